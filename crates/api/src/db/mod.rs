//! Database operations for the shop API `PostgreSQL`.
//!
//! # Database: `shopline`
//!
//! ## Tables
//!
//! - `users` - Shop owners
//! - `shops` - Storefronts, each owned by exactly one user
//! - `products` - Items belonging to exactly one shop
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/`, embedded in [`MIGRATOR`],
//! and run via:
//! ```bash
//! cargo run -p shopline-cli -- migrate
//! ```

pub mod filter;
pub mod seed;
pub mod shops;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use filter::{Column, PgPredicates, PredicateSink};
pub use shops::ShopRepository;

/// Schema migrations for the shop database.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
