//! Seed the database with demo data.
//!
//! Inserts a small fixed set of users, shops and products in one
//! transaction. A database that already has users is left as is.

use tracing::info;

use shopline_api::db::seed::seed_demo_data;

use super::{CommandError, connect};

/// Seed demo users, shops and products.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or any insert fails (nothing is persisted in that case).
pub async fn demo_data() -> Result<(), CommandError> {
    let pool = connect().await?;
    info!("Connected to database");

    let summary = seed_demo_data(&pool).await?;

    if summary.skipped {
        info!("Database already contains users; nothing seeded");
        return Ok(());
    }

    info!("Seeding complete!");
    info!("  Users inserted: {}", summary.users);
    info!("  Shops inserted: {}", summary.shops);
    info!("  Products inserted: {}", summary.products);
    Ok(())
}
