//! Shop repository for database operations.
//!
//! Listing queries are assembled with `sqlx::QueryBuilder` because the set of
//! filters varies per request; every filter value is a bound parameter.
//!
//! A shop is listed only when at least one of its products satisfies the
//! product filters (an inner join on products), and only those products are
//! embedded in the listing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use shopline_core::{Email, PageRequest, ShopId};

use super::RepositoryError;
use super::filter::PgPredicates;
use crate::models::{
    NewShop, OwnerSummary, ProductSummary, Shop, ShopChanges, ShopFilter, ShopListing,
};

const SHOP_COLUMNS: &str = "id, name, admin_email, user_id, created_at, updated_at";

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: ShopId,
    name: String,
    admin_email: Email,
    owner_name: String,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    shop_id: ShopId,
    name: String,
    images: Vec<String>,
    stock: i32,
    price: Decimal,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count shops matching `filter`, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &ShopFilter) -> Result<u64, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM shops s");
        push_listing_filters(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(self.pool).await?;
        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
    }

    /// List one page of shops matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &ShopFilter,
        page: &PageRequest,
    ) -> Result<Vec<ShopListing>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT s.id, s.name, s.admin_email, u.name AS owner_name \
             FROM shops s JOIN users u ON u.id = s.user_id",
        );
        push_listing_filters(&mut builder, filter);
        builder.push(" ORDER BY s.id");
        if let Some(limit) = page.limit() {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
            builder
                .push(" OFFSET ")
                .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        }

        let rows: Vec<ListingRow> = builder.build_query_as().fetch_all(self.pool).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id.as_i32()).collect();
        let mut products = self.matching_products(&ids, filter).await?;

        Ok(rows
            .into_iter()
            .map(|row| ShopListing {
                id: row.id,
                name: row.name,
                admin_email: row.admin_email,
                products: products.remove(&row.id).unwrap_or_default(),
                user: OwnerSummary {
                    name: row.owner_name,
                },
            })
            .collect())
    }

    /// Products of the given shops that satisfy the product filters.
    async fn matching_products(
        &self,
        shop_ids: &[i32],
        filter: &ShopFilter,
    ) -> Result<HashMap<ShopId, Vec<ProductSummary>>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT p.shop_id, p.name, p.images, p.stock, p.price \
             FROM products p WHERE p.shop_id = ANY(",
        );
        builder.push_bind(shop_ids.to_vec()).push(")");
        filter.apply_product(&mut PgPredicates::and_clause(&mut builder));
        builder.push(" ORDER BY p.id");

        let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(self.pool).await?;

        let mut by_shop: HashMap<ShopId, Vec<ProductSummary>> = HashMap::new();
        for row in rows {
            by_shop.entry(row.shop_id).or_default().push(ProductSummary {
                name: row.name,
                images: row.images,
                stock: row.stock,
                price: row.price,
            });
        }
        Ok(by_shop)
    }

    /// Get a shop by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let shop = sqlx::query_as::<_, Shop>(&format!(
            "SELECT {SHOP_COLUMNS} FROM shops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shop)
    }

    /// Insert a new shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// foreign key violations for an unknown owner.
    pub async fn create(&self, shop: &NewShop) -> Result<Shop, RepositoryError> {
        let created = sqlx::query_as::<_, Shop>(&format!(
            "INSERT INTO shops (name, admin_email, user_id) \
             VALUES ($1, $2, $3) \
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(&shop.name)
        .bind(&shop.admin_email)
        .bind(shop.user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Update the shop with `id`; omitted fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ShopId, changes: &ShopChanges) -> Result<Shop, RepositoryError> {
        sqlx::query_as::<_, Shop>(&format!(
            "UPDATE shops \
             SET name = COALESCE($2, name), \
                 admin_email = COALESCE($3, admin_email), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.admin_email.as_ref().map(Email::as_str))
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete the shop with `id` (its products cascade).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ShopId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Append the shop and product filters shared by the count and page queries.
fn push_listing_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ShopFilter) {
    builder.push(" WHERE EXISTS (SELECT 1 FROM products p WHERE p.shop_id = s.id");
    filter.apply_product(&mut PgPredicates::and_clause(builder));
    builder.push(")");
    filter.apply_shop(&mut PgPredicates::and_clause(builder));
}
