//! API utilities for frontend-backend communication

use contracts::domain::a001_translations::ApiErrorBody;
use gloo_net::http::Response;

/// Get the base URL for API requests
///
/// The translation store listens on port 3000 of the same host the page
/// was served from. Returns an empty string outside a browser.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with `/api/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Human-readable message for a non-2xx response.
///
/// Prefers the `{ "message": .. }` body the backend sends with every error.
pub async fn error_message(response: Response, action: &str) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => describe_failure(action, status, Some(&body.message)),
        Err(_) => describe_failure(action, status, None),
    }
}

pub fn describe_failure(action: &str, status: u16, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("{}: {}", action, message),
        None => format!("{}: HTTP {}", action, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_failure_prefers_server_message() {
        assert_eq!(
            describe_failure("Save failed", 409, Some("Key `hero` conflicts with `hero.title`")),
            "Save failed: Key `hero` conflicts with `hero.title`"
        );
        assert_eq!(describe_failure("Save failed", 500, Some("  ")), "Save failed: HTTP 500");
        assert_eq!(describe_failure("Load failed", 502, None), "Load failed: HTTP 502");
    }
}
