//! Repository and service tests against a live `PostgreSQL` database.
//!
//! These tests require a reachable database in `SHOPLINE_DATABASE_URL`
//! (or `DATABASE_URL`); migrations are applied automatically.
//!
//! Run with: cargo test -p shopline-integration-tests -- --ignored

use shopline_api::db::{RepositoryError, ShopRepository};
use shopline_api::error::AppError;
use shopline_api::models::{NewShop, ShopChanges, ShopFilter};
use shopline_api::services::ShopService;
use shopline_core::{Email, PageRequest, ShopId};
use shopline_integration_tests::{
    insert_product, insert_shop, insert_shops, insert_user, test_pool, unique_tag,
};

fn tagged(tag: &str) -> ShopFilter {
    ShopFilter {
        shop_name: Some(tag.to_string()),
        ..ShopFilter::default()
    }
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_second_page_of_twelve_shops() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    let ids = insert_shops(&pool, &tag, 12).await.expect("Failed to insert shops");

    let service = ShopService::new(ShopRepository::new(&pool));
    let page = PageRequest::new(Some(2), Some(5)).expect("valid page");
    let result = service.list(&tagged(&tag), page).await.expect("list failed");

    assert_eq!(result.pagination.total_row, 12);
    assert_eq!(result.pagination.total_page, 3);
    let listed: Vec<ShopId> = result.shops.iter().map(|s| s.id).collect();
    assert_eq!(listed, ids[5..10]);
    assert_eq!(result.pagination.prev.map(|p| p.page), Some(1));
    assert_eq!(result.pagination.next.map(|p| p.page), Some(3));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_page_past_end_is_not_found() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    insert_shops(&pool, &tag, 3).await.expect("Failed to insert shops");

    let service = ShopService::new(ShopRepository::new(&pool));
    let page = PageRequest::new(Some(2), Some(5)).expect("valid page");
    let err = service.list(&tagged(&tag), page).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Page not found"));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_shop_name_filter_ignores_case() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    insert_shops(&pool, &tag, 2).await.expect("Failed to insert shops");

    let repo = ShopRepository::new(&pool);
    let upper = tagged(&tag.to_uppercase());
    assert_eq!(repo.count(&upper).await.expect("count failed"), 2);

    let miss = tagged(&format!("{tag}-zzz"));
    assert_eq!(repo.count(&miss).await.expect("count failed"), 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_like_wildcards_are_literal() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    insert_shops(&pool, &tag, 1).await.expect("Failed to insert shops");

    let repo = ShopRepository::new(&pool);
    let wildcard = tagged(&format!("{tag}%"));
    assert_eq!(repo.count(&wildcard).await.expect("count failed"), 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_stock_filter_excludes_shops_and_products() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    let owner = insert_user(&pool, "Stock Owner").await.expect("user");

    let sold_out = insert_shop(&pool, &format!("{tag} sold out"), "a@sold.example", owner)
        .await
        .expect("shop");
    insert_product(&pool, sold_out, "Kettle", 0).await.expect("product");

    let stocked = insert_shop(&pool, &format!("{tag} stocked"), "b@stocked.example", owner)
        .await
        .expect("shop");
    insert_product(&pool, stocked, "Kettle", 5).await.expect("product");
    insert_product(&pool, stocked, "Teapot", 0).await.expect("product");

    let filter = ShopFilter {
        stock: Some(5),
        ..tagged(&tag)
    };
    let repo = ShopRepository::new(&pool);
    let shops = repo
        .list(&filter, &PageRequest::default())
        .await
        .expect("list failed");

    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].id, stocked);
    assert_eq!(shops[0].products.len(), 1);
    assert_eq!(shops[0].products[0].name, "Kettle");
    assert_eq!(shops[0].user.name, "Stock Owner");
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_create_returns_input_with_fresh_id() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let owner = insert_user(&pool, "Creator").await.expect("user");

    let input = NewShop {
        name: format!("{} created", unique_tag()),
        admin_email: Email::parse("owner@created.example").expect("email"),
        user_id: owner,
    };
    let repo = ShopRepository::new(&pool);
    let created = repo.create(&input).await.expect("create failed");

    assert_eq!(created.name, input.name);
    assert_eq!(created.admin_email, input.admin_email);
    assert_eq!(created.user_id, owner);

    let fetched = repo.get_by_id(created.id).await.expect("get failed");
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_create_with_unknown_owner_is_database_error() {
    let pool = test_pool().await.expect("Failed to connect to database");

    let input = NewShop {
        name: "Orphan".to_string(),
        admin_email: Email::parse("orphan@example.com").expect("email"),
        user_id: shopline_core::UserId::new(i32::MAX),
    };
    let service = ShopService::new(ShopRepository::new(&pool));
    let err = service.create(&input).await.unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_update_changes_only_target_row() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    let ids = insert_shops(&pool, &tag, 3).await.expect("Failed to insert shops");

    let repo = ShopRepository::new(&pool);
    let changes = ShopChanges {
        name: Some(format!("{tag} renamed")),
        admin_email: None,
    };
    let updated = repo.update(ids[1], &changes).await.expect("update failed");
    assert_eq!(updated.name, format!("{tag} renamed"));
    assert_eq!(updated.admin_email.as_str(), format!("admin2@{tag}.example"));

    for (n, id) in [(1, ids[0]), (3, ids[2])] {
        let shop = repo.get_by_id(id).await.expect("get failed").expect("shop");
        assert_eq!(shop.name, format!("{tag} shop {n}"));
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_update_missing_id_is_not_found() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    let ids = insert_shops(&pool, &tag, 2).await.expect("Failed to insert shops");

    let repo = ShopRepository::new(&pool);
    let changes = ShopChanges {
        name: Some("Clobbered".to_string()),
        admin_email: None,
    };
    let err = repo.update(ShopId::new(i32::MAX), &changes).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    for id in ids {
        let shop = repo.get_by_id(id).await.expect("get failed").expect("shop");
        assert_ne!(shop.name, "Clobbered");
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_delete_removes_only_target_row() {
    let pool = test_pool().await.expect("Failed to connect to database");
    let tag = unique_tag();
    let ids = insert_shops(&pool, &tag, 3).await.expect("Failed to insert shops");

    let repo = ShopRepository::new(&pool);
    let err = repo.delete(ShopId::new(i32::MAX)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(repo.count(&tagged(&tag)).await.expect("count failed"), 3);

    repo.delete(ids[0]).await.expect("delete failed");
    assert!(repo.get_by_id(ids[0]).await.expect("get failed").is_none());
    assert_eq!(repo.count(&tagged(&tag)).await.expect("count failed"), 2);

    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE shop_id = $1")
        .bind(ids[0])
        .fetch_one(&pool)
        .await
        .expect("count products");
    assert_eq!(orphaned, 0);
}
