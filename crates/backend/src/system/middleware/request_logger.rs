use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Пишет в tracing (stdout + logs/backend.log):
/// - длительность (ms)
/// - размер ответа
/// - статус код
/// - метод и путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                target: "http",
                "{:>5}ms | body error: {} | {} {:>6} {}",
                start.elapsed().as_millis(),
                e,
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let duration = start.elapsed().as_millis();
    let size = format_size(bytes.len());
    let status = parts.status;

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            target: "http",
            "{:>5}ms | {:>10} | {} {:>6} {}",
            duration,
            size,
            status.as_u16(),
            method,
            uri.path()
        );
    } else {
        tracing::info!(
            target: "http",
            "{:>5}ms | {:>10} | {} {:>6} {}",
            duration,
            size,
            status.as_u16(),
            method,
            uri.path()
        );
    }

    Response::from_parts(parts, Body::from(bytes))
}
