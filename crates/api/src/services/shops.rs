//! Shop use-case service.
//!
//! # Responsibility
//! - Turn listing filters and a page request into a counted, paginated fetch.
//! - Resolve single-shop lookups and id-scoped mutations.
//!
//! # Invariants
//! - A page past the end fails with `NotFound` before any rows are fetched.
//! - Update and delete only ever touch the row with the requested id; a
//!   missing id fails with `NotFound` and nothing is written.

use std::future::Future;

use shopline_core::{PageMeta, PageRequest, ShopId};

use crate::db::{RepositoryError, ShopRepository};
use crate::error::Result;
use crate::models::{NewShop, Shop, ShopChanges, ShopFilter, ShopListing};

/// Persistence operations the shop service needs.
pub trait ShopStore {
    /// Count shops matching `filter`.
    fn count_shops(
        &self,
        filter: &ShopFilter,
    ) -> impl Future<Output = std::result::Result<u64, RepositoryError>> + Send;

    /// Fetch one page of shops matching `filter`, in insertion order.
    fn list_shops(
        &self,
        filter: &ShopFilter,
        page: &PageRequest,
    ) -> impl Future<Output = std::result::Result<Vec<ShopListing>, RepositoryError>> + Send;

    fn find_shop(
        &self,
        id: ShopId,
    ) -> impl Future<Output = std::result::Result<Option<Shop>, RepositoryError>> + Send;

    fn insert_shop(
        &self,
        shop: &NewShop,
    ) -> impl Future<Output = std::result::Result<Shop, RepositoryError>> + Send;

    /// Apply `changes` to the shop with `id`, or `RepositoryError::NotFound`.
    fn update_shop(
        &self,
        id: ShopId,
        changes: &ShopChanges,
    ) -> impl Future<Output = std::result::Result<Shop, RepositoryError>> + Send;

    /// Delete the shop with `id`, or `RepositoryError::NotFound`.
    fn delete_shop(
        &self,
        id: ShopId,
    ) -> impl Future<Output = std::result::Result<(), RepositoryError>> + Send;
}

impl ShopStore for ShopRepository<'_> {
    async fn count_shops(&self, filter: &ShopFilter) -> std::result::Result<u64, RepositoryError> {
        self.count(filter).await
    }

    async fn list_shops(
        &self,
        filter: &ShopFilter,
        page: &PageRequest,
    ) -> std::result::Result<Vec<ShopListing>, RepositoryError> {
        self.list(filter, page).await
    }

    async fn find_shop(&self, id: ShopId) -> std::result::Result<Option<Shop>, RepositoryError> {
        self.get_by_id(id).await
    }

    async fn insert_shop(&self, shop: &NewShop) -> std::result::Result<Shop, RepositoryError> {
        self.create(shop).await
    }

    async fn update_shop(
        &self,
        id: ShopId,
        changes: &ShopChanges,
    ) -> std::result::Result<Shop, RepositoryError> {
        self.update(id, changes).await
    }

    async fn delete_shop(&self, id: ShopId) -> std::result::Result<(), RepositoryError> {
        self.delete(id).await
    }
}

/// One page of a shop listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopPage {
    pub pagination: PageMeta,
    pub shops: Vec<ShopListing>,
}

/// Shop operations over any [`ShopStore`].
pub struct ShopService<S> {
    store: S,
}

impl<S: ShopStore> ShopService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// List shops matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if `page` is past the last page, or the
    /// mapped repository error if a query fails.
    pub async fn list(&self, filter: &ShopFilter, page: PageRequest) -> Result<ShopPage> {
        let total = self.store.count_shops(filter).await?;
        let pagination = PageMeta::for_request(&page, total)?;
        let shops = self.store.list_shops(filter, &page).await?;

        tracing::debug!(
            total_row = total,
            page = page.page(),
            returned = shops.len(),
            "Listed shops"
        );

        Ok(ShopPage { pagination, shops })
    }

    /// Look up a shop; `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns the mapped repository error if the query fails.
    pub async fn get(&self, id: ShopId) -> Result<Option<Shop>> {
        Ok(self.store.find_shop(id).await?)
    }

    /// Create a shop.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the database rejects the row (for
    /// example an unknown owner).
    pub async fn create(&self, shop: &NewShop) -> Result<Shop> {
        let created = self.store.insert_shop(shop).await?;
        tracing::info!(shop_id = %created.id, user_id = %created.user_id, "Created shop");
        Ok(created)
    }

    /// Update the shop with `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no shop has this id.
    pub async fn update(&self, id: ShopId, changes: &ShopChanges) -> Result<Shop> {
        let updated = self.store.update_shop(id, changes).await?;
        tracing::info!(shop_id = %id, "Updated shop");
        Ok(updated)
    }

    /// Delete the shop with `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no shop has this id.
    pub async fn delete(&self, id: ShopId) -> Result<()> {
        self.store.delete_shop(id).await?;
        tracing::info!(shop_id = %id, "Deleted shop");
        Ok(())
    }
}
