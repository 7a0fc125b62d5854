use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_TRANSLATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS a001_translations (
        language TEXT NOT NULL,
        "key" TEXT NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT,
        PRIMARY KEY (language, "key")
    );
"#;

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database already initialized"))?;
    Ok(())
}

/// Minimal schema bootstrap
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_TRANSLATIONS_TABLE.to_string(),
    ))
    .await?;
    Ok(())
}

/// Makes `conn` the process-wide connection. Fails if one is already set.
#[cfg(test)]
pub fn install_connection(conn: DatabaseConnection) -> anyhow::Result<()> {
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database already initialized"))
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("database connection is not initialized")
}

/// Fresh in-memory database with the schema applied.
///
/// The pool is pinned to a single connection: every sqlite `:memory:`
/// connection is a separate database.
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    use sea_orm::ConnectOptions;

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}
