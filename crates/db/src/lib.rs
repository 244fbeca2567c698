//! Persistence layer: connection pool, migrations, row models, and the
//! repositories that own every SQL statement against `todos`, `sprints`,
//! and `users`.

pub mod filter;
pub mod models;
pub mod repositories;
pub mod wire_time;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub type DbPool = sqlx::PgPool;

/// Maximum pooled connections shared by all request handlers.
const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from pre-built connect options.
///
/// Options are passed structurally (not as a URL string) so the password
/// never ends up in a formatted connection string or log line.
pub async fn create_pool(options: PgConnectOptions) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        host = options.get_host(),
        port = options.get_port(),
        database = ?options.get_database(),
        "Opening database connection pool"
    );
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`, each exactly once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
