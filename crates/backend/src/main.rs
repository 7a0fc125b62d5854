pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    // Initialize database and make sure the store is never empty
    let db_path = shared::config::resolve_path(&config.database.path);
    shared::data::db::initialize_database(&db_path)
        .await
        .context("db init failed")?;
    domain::a001_translations::service::seed_defaults_if_empty(shared::data::db::get_connection())
        .await
        .context("seeding default translations failed")?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let static_dir = shared::config::resolve_path(&config.static_files.dir);
    let app = routes::configure_routes(&static_dir).layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    tracing::info!("Translation store listening on http://{}", addr);
    tracing::info!("Serving frontend from {}", static_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
