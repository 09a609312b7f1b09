//! Session store migration.

use sqlx::postgres::PgPoolOptions;
use tower_sessions_sqlx_store::PostgresStore;

/// Create the storefront session table.
///
/// Reads `STOREFRONT_DATABASE_URL` (falling back to `DATABASE_URL`) and runs
/// the tower-sessions store migration. Safe to run repeatedly.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| "STOREFRONT_DATABASE_URL is not set")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    let store = PostgresStore::new(pool);
    store.migrate().await?;

    tracing::info!("session table is up to date");
    Ok(())
}
