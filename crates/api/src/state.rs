//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::ShopRepository;
use crate::services::ShopService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the shared database pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Shop service backed by the shared pool.
    #[must_use]
    pub fn shops(&self) -> ShopService<ShopRepository<'_>> {
        ShopService::new(ShopRepository::new(self.pool()))
    }
}
