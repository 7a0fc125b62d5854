use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use contracts::domain::a001_translations::{
    LanguageTree, ResetResponse, TranslationValidation, TranslationsResponse,
    UpdateTranslationRequest, UpdateTranslationResponse,
};
use contracts::enums::language::Language;

use crate::domain::a001_translations::{service, TranslationError};
use crate::shared::data::db::get_connection;

/// GET /api/translations
pub async fn list_all() -> Result<Json<TranslationsResponse>, TranslationError> {
    service::load_all(get_connection()).await.map(Json)
}

/// GET /api/translations/:lang
pub async fn get_language(Path(lang): Path<String>) -> Result<Json<LanguageTree>, TranslationError> {
    let language =
        Language::from_code(&lang).ok_or_else(|| TranslationError::UnknownLanguage(lang))?;
    service::load_language(get_connection(), language)
        .await
        .map(Json)
}

/// PUT /api/translations
pub async fn update(
    payload: Result<Json<UpdateTranslationRequest>, JsonRejection>,
) -> Result<Json<UpdateTranslationResponse>, TranslationError> {
    let Json(request) = payload.map_err(|e| TranslationError::BadRequest(e.body_text()))?;
    service::update(get_connection(), request).await.map(Json)
}

/// GET /api/translations/validate
pub async fn validate() -> Result<Json<TranslationValidation>, TranslationError> {
    let translations = service::load_all(get_connection()).await?;
    Ok(Json(service::validate(&translations)))
}

/// POST /api/translations/reset
pub async fn reset() -> Result<Json<ResetResponse>, TranslationError> {
    tracing::warn!("Resetting all translations to defaults");
    service::reset(get_connection()).await.map(Json)
}

#[cfg(test)]
mod tests {
    use crate::domain::a001_translations::service;
    use crate::routes::configure_routes;
    use crate::shared::data::db::{connect_in_memory, install_connection};
    use axum::body::{self, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use contracts::domain::a001_translations::ApiErrorBody;
    use serde_json::Value;
    use std::path::Path;
    use tower::ServiceExt;

    async fn send(method: Method, uri: &str, json: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match json {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = configure_routes(Path::new("dist"))
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn error_message(bytes: &[u8]) -> String {
        serde_json::from_slice::<ApiErrorBody>(bytes).unwrap().message
    }

    #[tokio::test]
    async fn test_unknown_language_is_not_found() {
        let (status, bytes) = send(Method::GET, "/api/translations/de", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&bytes), "Unknown language `de`");
    }

    #[tokio::test]
    async fn test_malformed_update_body_is_bad_request() {
        let (status, bytes) = send(Method::PUT, "/api/translations", Some(r#"{"language": "en""#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&bytes).is_empty());
    }

    #[tokio::test]
    async fn test_update_with_unknown_language_is_bad_request() {
        let (status, bytes) = send(
            Method::PUT,
            "/api/translations",
            Some(r#"{"language": "de", "key": "hero.title", "value": "Hallo"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&bytes).is_empty());
    }

    // The only test that touches the process-wide connection
    #[tokio::test]
    async fn test_list_all_returns_nested_trees() {
        let conn = connect_in_memory().await.unwrap();
        service::seed_defaults_if_empty(&conn).await.unwrap();
        install_connection(conn).unwrap();

        let (status, bytes) = send(Method::GET, "/api/translations", None).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        for lang in ["en", "hy", "ru"] {
            assert!(body[lang]["hero"]["title"].is_string(), "{lang}");
        }
        assert_eq!(
            body["en"]["hero"]["title"],
            "Your love story, beautifully told"
        );
        assert!(body["en"].get("hero.title").is_none());
    }
}
