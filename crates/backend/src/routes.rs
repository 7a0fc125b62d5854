use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::services::ServeDir;

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // TRANSLATION STORE
        // ========================================
        .route(
            "/api/translations",
            get(handlers::a001_translations::list_all).put(handlers::a001_translations::update),
        )
        .route(
            "/api/translations/validate",
            get(handlers::a001_translations::validate),
        )
        .route(
            "/api/translations/reset",
            post(handlers::a001_translations::reset),
        )
        .route(
            "/api/translations/:lang",
            get(handlers::a001_translations::get_language),
        )
        // Built frontend (index.html, wasm, css)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
}
