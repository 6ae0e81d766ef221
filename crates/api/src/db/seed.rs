//! Demo data for a freshly migrated database.
//!
//! Everything is inserted inside one transaction; a database that already
//! holds users is left untouched.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use shopline_core::{ShopId, UserId};

use super::RepositoryError;

struct DemoProduct {
    name: &'static str,
    images: &'static [&'static str],
    stock: i32,
    /// Price in cents.
    price_cents: i64,
}

struct DemoShop {
    name: &'static str,
    admin_email: &'static str,
    products: &'static [DemoProduct],
}

struct DemoUser {
    name: &'static str,
    shops: &'static [DemoShop],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Rina Hartono",
        shops: &[
            DemoShop {
                name: "Acme Tea House",
                admin_email: "rina@acmetea.example",
                products: &[
                    DemoProduct {
                        name: "Green Tea",
                        images: &["green-tea-front.png", "green-tea-back.png"],
                        stock: 5,
                        price_cents: 1250,
                    },
                    DemoProduct {
                        name: "Oolong Tea",
                        images: &["oolong.png"],
                        stock: 0,
                        price_cents: 1800,
                    },
                ],
            },
            DemoShop {
                name: "Acme Kitchenware",
                admin_email: "kitchen@acmetea.example",
                products: &[DemoProduct {
                    name: "Cast Iron Kettle",
                    images: &["kettle.png"],
                    stock: 12,
                    price_cents: 5400,
                }],
            },
        ],
    },
    DemoUser {
        name: "Dimas Pratama",
        shops: &[
            DemoShop {
                name: "Globex Gadgets",
                admin_email: "dimas@globex.example",
                products: &[
                    DemoProduct {
                        name: "Desk Lamp",
                        images: &["lamp.png"],
                        stock: 5,
                        price_cents: 3999,
                    },
                    DemoProduct {
                        name: "Tea Timer",
                        images: &[],
                        stock: 40,
                        price_cents: 899,
                    },
                ],
            },
            // No products: never appears in listings.
            DemoShop {
                name: "Globex Outlet",
                admin_email: "outlet@globex.example",
                products: &[],
            },
        ],
    },
];

/// Counts of inserted demo rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub shops: usize,
    pub products: usize,
    /// The database already had users, so nothing was inserted.
    pub skipped: bool,
}

/// Insert the demo users, shops and products.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any insert fails; the transaction
/// is rolled back and nothing is persisted.
pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedSummary, RepositoryError> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "Users already present, skipping seed");
        return Ok(SeedSummary {
            skipped: true,
            ..SeedSummary::default()
        });
    }

    let mut summary = SeedSummary::default();
    for user in DEMO_USERS {
        let user_id = insert_user(&mut tx, user.name).await?;
        summary.users += 1;

        for shop in user.shops {
            let shop_id = insert_shop(&mut tx, shop, user_id).await?;
            summary.shops += 1;

            for product in shop.products {
                insert_product(&mut tx, product, shop_id).await?;
                summary.products += 1;
            }
        }
    }

    tx.commit().await?;
    tracing::info!(
        users = summary.users,
        shops = summary.shops,
        products = summary.products,
        "Seeded demo data"
    );
    Ok(summary)
}

async fn insert_user(tx: &mut Transaction<'_, Postgres>, name: &str) -> Result<UserId, RepositoryError> {
    let id = sqlx::query_scalar::<_, UserId>("INSERT INTO users (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;
    Ok(id)
}

async fn insert_shop(
    tx: &mut Transaction<'_, Postgres>,
    shop: &DemoShop,
    user_id: UserId,
) -> Result<ShopId, RepositoryError> {
    let id = sqlx::query_scalar::<_, ShopId>(
        "INSERT INTO shops (name, admin_email, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(shop.name)
    .bind(shop.admin_email)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

async fn insert_product(
    tx: &mut Transaction<'_, Postgres>,
    product: &DemoProduct,
    shop_id: ShopId,
) -> Result<(), RepositoryError> {
    let images: Vec<String> = product.images.iter().map(|s| (*s).to_owned()).collect();

    sqlx::query(
        "INSERT INTO products (name, images, stock, price, shop_id) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product.name)
    .bind(images)
    .bind(product.stock)
    .bind(Decimal::new(product.price_cents, 2))
    .bind(shop_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use shopline_core::Email;

    use super::*;

    #[test]
    fn test_demo_emails_are_valid() {
        for shop in DEMO_USERS.iter().flat_map(|u| u.shops) {
            assert!(Email::parse(shop.admin_email).is_ok(), "{}", shop.admin_email);
        }
    }

    #[test]
    fn test_demo_products_have_non_negative_stock() {
        let products = DEMO_USERS
            .iter()
            .flat_map(|u| u.shops)
            .flat_map(|s| s.products);
        for product in products {
            assert!(product.stock >= 0, "{}", product.name);
            assert!(product.price_cents > 0, "{}", product.name);
        }
    }
}
