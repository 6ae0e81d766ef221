//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use shopline_api::config::{ConfigError, get_database_url};
use sqlx::PgPool;

/// Load `.env` and connect to the shop database.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url: SecretString = get_database_url("SHOPLINE_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    let pool = shopline_api::db::create_pool(&database_url).await?;
    Ok(pool)
}

/// Errors shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seed failed: {0}")]
    Seed(#[from] shopline_api::db::RepositoryError),
}
