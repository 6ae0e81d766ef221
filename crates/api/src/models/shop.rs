//! Shop domain types and request bodies.
//!
//! Request bodies are deserialised loosely (every field optional) and then
//! validated into [`NewShop`] / [`ShopChanges`], so that a missing field is
//! reported through the response envelope rather than as a JSON parse error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopline_core::{Email, ShopId, UserId};

use super::ValidationErrors;
use crate::db::filter::{Column, PredicateSink};

/// Maximum length of a shop name.
pub const MAX_NAME_LENGTH: usize = 255;

/// A shop as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub admin_email: Email,
    /// Owning user.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shop as shown in listings, with its matching products and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopListing {
    #[serde(skip)]
    pub id: ShopId,
    pub name: String,
    pub admin_email: Email,
    pub products: Vec<ProductSummary>,
    pub user: OwnerSummary,
}

/// Product fields embedded in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub images: Vec<String>,
    pub stock: i32,
    pub price: Decimal,
}

/// Owner fields embedded in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub name: String,
}

/// Listing filters. Every field is optional; absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopFilter {
    /// Case-insensitive substring of the shop name.
    pub shop_name: Option<String>,
    /// Case-insensitive substring of a product name.
    pub product_name: Option<String>,
    /// Exact product stock.
    pub stock: Option<i32>,
}

impl ShopFilter {
    /// Emit the predicates on the shop row itself.
    pub fn apply_shop<P: PredicateSink>(&self, sink: &mut P) {
        if let Some(name) = &self.shop_name {
            sink.contains_ignore_case(Column::ShopName, name);
        }
    }

    /// Emit the predicates a product must satisfy for its shop to be listed.
    pub fn apply_product<P: PredicateSink>(&self, sink: &mut P) {
        if let Some(name) = &self.product_name {
            sink.contains_ignore_case(Column::ProductName, name);
        }
        if let Some(stock) = self.stock {
            sink.equals(Column::ProductStock, stock);
        }
    }
}

/// Body of `POST /shops`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopRequest {
    pub name: Option<String>,
    pub admin_email: Option<String>,
    pub user_id: Option<i32>,
}

/// A validated shop ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShop {
    pub name: String,
    pub admin_email: Email,
    pub user_id: UserId,
}

impl CreateShopRequest {
    /// Validate every field, collecting all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if any field is missing or malformed.
    pub fn validate(self) -> Result<NewShop, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name {
            Some(name) => check_name(name, &mut errors),
            None => {
                errors.push("name is required");
                None
            }
        };

        let admin_email = match self.admin_email {
            Some(email) => check_email(&email, &mut errors),
            None => {
                errors.push("adminEmail is required");
                None
            }
        };

        let user_id = match self.user_id {
            Some(id) if id > 0 => Some(UserId::new(id)),
            Some(_) => {
                errors.push("userId must be a positive integer");
                None
            }
            None => {
                errors.push("userId is required");
                None
            }
        };

        match (name, admin_email, user_id) {
            (Some(name), Some(admin_email), Some(user_id)) if errors.is_empty() => Ok(NewShop {
                name,
                admin_email,
                user_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /shops/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub admin_email: Option<String>,
}

/// Validated changes to a shop; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopChanges {
    pub name: Option<String>,
    pub admin_email: Option<Email>,
}

impl UpdateShopRequest {
    /// Validate the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if a supplied field is malformed.
    pub fn validate(self) -> Result<ShopChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.and_then(|name| check_name(name, &mut errors));
        let admin_email = self
            .admin_email
            .and_then(|email| check_email(&email, &mut errors));
        errors.into_result(ShopChanges { name, admin_email })
    }
}

fn check_name(name: String, errors: &mut ValidationErrors) -> Option<String> {
    if name.trim().is_empty() {
        errors.push("name cannot be empty");
        return None;
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(format!("name must be at most {MAX_NAME_LENGTH} characters"));
        return None;
    }
    Some(name)
}

fn check_email(email: &str, errors: &mut ValidationErrors) -> Option<Email> {
    match Email::parse(email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(format!("adminEmail is invalid: {e}"));
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create(name: Option<&str>, email: Option<&str>, user_id: Option<i32>) -> CreateShopRequest {
        CreateShopRequest {
            name: name.map(String::from),
            admin_email: email.map(String::from),
            user_id,
        }
    }

    #[test]
    fn test_create_valid() {
        let shop = create(Some("Acme"), Some("owner@acme.com"), Some(1))
            .validate()
            .unwrap();
        assert_eq!(shop.name, "Acme");
        assert_eq!(shop.admin_email.as_str(), "owner@acme.com");
        assert_eq!(shop.user_id, UserId::new(1));
    }

    #[test]
    fn test_create_keeps_fields_as_sent() {
        let shop = create(Some(" Acme  Tea "), Some("Owner@Acme.com"), Some(2))
            .validate()
            .unwrap();
        assert_eq!(shop.name, " Acme  Tea ");
        assert_eq!(shop.admin_email.as_str(), "Owner@Acme.com");
    }

    #[test]
    fn test_padded_email_is_rejected_not_rewritten() {
        let err = create(Some("Acme"), Some(" owner@acme.com "), Some(1))
            .validate()
            .unwrap_err();
        assert!(err.first().unwrap().starts_with("adminEmail is invalid"));
    }

    #[test]
    fn test_create_reports_first_violation() {
        let err = create(None, None, None).validate().unwrap_err();
        assert_eq!(err.first(), Some("name is required"));

        let err = create(Some("Acme"), None, Some(1)).validate().unwrap_err();
        assert_eq!(err.first(), Some("adminEmail is required"));

        let err = create(Some("Acme"), Some("owner@acme.com"), None)
            .validate()
            .unwrap_err();
        assert_eq!(err.first(), Some("userId is required"));
    }

    #[test]
    fn test_create_rejects_bad_email() {
        let err = create(Some("Acme"), Some("not-an-email"), Some(1))
            .validate()
            .unwrap_err();
        assert!(err.first().unwrap().starts_with("adminEmail is invalid"));
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_user() {
        let err = create(Some("   "), Some("owner@acme.com"), Some(0))
            .validate()
            .unwrap_err();
        assert_eq!(err.first(), Some("name cannot be empty"));
        assert_eq!(err.to_string(), "name cannot be empty");
    }

    #[test]
    fn test_create_rejects_long_name() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = create(Some(&long), Some("owner@acme.com"), Some(1))
            .validate()
            .unwrap_err();
        assert_eq!(err.first(), Some("name must be at most 255 characters"));
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let req: CreateShopRequest =
            serde_json::from_str(r#"{"name":"Acme","adminEmail":"owner@acme.com","userId":3}"#)
                .unwrap();
        let shop = req.validate().unwrap();
        assert_eq!(shop.user_id, UserId::new(3));
    }

    #[test]
    fn test_update_partial() {
        let changes = UpdateShopRequest {
            name: Some("Acme Outlet".to_string()),
            admin_email: None,
        }
        .validate()
        .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Acme Outlet"));
        assert!(changes.admin_email.is_none());
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let err = UpdateShopRequest {
            name: None,
            admin_email: Some("owner@".to_string()),
        }
        .validate()
        .unwrap_err();
        assert!(err.first().unwrap().starts_with("adminEmail is invalid"));
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl PredicateSink for Recorder {
        fn contains_ignore_case(&mut self, column: Column, needle: &str) {
            self.0.push(format!("{} ~ {needle}", column.sql()));
        }

        fn equals(&mut self, column: Column, value: i32) {
            self.0.push(format!("{} = {value}", column.sql()));
        }
    }

    #[test]
    fn test_filter_splits_shop_and_product_predicates() {
        let filter = ShopFilter {
            shop_name: Some("acm".to_string()),
            product_name: Some("tea".to_string()),
            stock: Some(5),
        };

        let mut shop = Recorder::default();
        filter.apply_shop(&mut shop);
        assert_eq!(shop.0, vec!["s.name ~ acm"]);

        let mut product = Recorder::default();
        filter.apply_product(&mut product);
        assert_eq!(product.0, vec!["p.name ~ tea", "p.stock = 5"]);
    }

    #[test]
    fn test_empty_filter_emits_nothing() {
        let mut sink = Recorder::default();
        ShopFilter::default().apply_shop(&mut sink);
        ShopFilter::default().apply_product(&mut sink);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_listing_wire_shape() {
        let listing = ShopListing {
            id: ShopId::new(1),
            name: "Acme".to_string(),
            admin_email: Email::parse("owner@acme.com").unwrap(),
            products: vec![ProductSummary {
                name: "Green tea".to_string(),
                images: vec!["tea.png".to_string()],
                stock: 5,
                price: Decimal::new(1250, 2),
            }],
            user: OwnerSummary {
                name: "Rina".to_string(),
            },
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Acme",
                "adminEmail": "owner@acme.com",
                "products": [{
                    "name": "Green tea",
                    "images": ["tea.png"],
                    "stock": 5,
                    "price": "12.50"
                }],
                "user": { "name": "Rina" }
            })
        );
    }
}
