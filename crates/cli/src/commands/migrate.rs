//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! shopline migrate
//! shopline migrate --status
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPLINE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded in
//! [`shopline_api::db::MIGRATOR`] at compile time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_users.sql
//! ├── 20260301000002_create_shops.sql
//! └── 20260301000003_create_products.sql
//! ```

use std::collections::HashSet;

use sqlx::migrate::Migrate;

use shopline_api::db::MIGRATOR;

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Log each embedded migration with whether it has been applied.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be queried.
pub async fn status() -> Result<(), CommandError> {
    let pool = connect().await?;
    let mut conn = pool.acquire().await?;

    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    let mut pending = 0_usize;
    for migration in MIGRATOR.iter().filter(|m| !m.migration_type.is_down_migration()) {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            pending += 1;
            "pending"
        };
        tracing::info!("  {} {} [{state}]", migration.version, migration.description);
    }

    tracing::info!(pending, "Migration status");
    Ok(())
}
