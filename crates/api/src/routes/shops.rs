//! Shop route handlers.
//!
//! JSON endpoints for listing, reading, creating, updating and deleting
//! shops. Every response, success or failure, uses [`Envelope`].

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use shopline_core::{PageError, PageRequest, ShopId};

use crate::error::{AppError, Result};
use crate::models::{CreateShopRequest, Envelope, Shop, ShopFilter, ShopListing, UpdateShopRequest};
use crate::state::AppState;

/// Raw listing query string. Values stay strings so that bad numbers are
/// reported through the envelope; empty values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopListQuery {
    pub shop_name: Option<String>,
    pub product_name: Option<String>,
    pub stock: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ShopListQuery {
    /// Split into filters and a page request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first malformed parameter.
    pub fn parse(self) -> Result<(ShopFilter, PageRequest)> {
        let stock = match present(self.stock) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .ok()
                    .filter(|stock| *stock >= 0)
                    .ok_or_else(|| {
                        AppError::Validation("stock must be a non-negative integer".to_owned())
                    })?,
            ),
            None => None,
        };

        let page = parse_positive(self.page, "page")?;
        let limit = parse_positive(self.limit, "limit")?;

        let filter = ShopFilter {
            shop_name: present(self.shop_name),
            product_name: present(self.product_name),
            stock,
        };
        Ok((filter, PageRequest::new(page, limit)?))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_positive(value: Option<String>, param: &'static str) -> Result<Option<u32>> {
    present(value)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| AppError::from(PageError::NotPositive { param }))
        })
        .transpose()
}

fn parse_id(raw: &str) -> Result<ShopId> {
    raw.parse()
        .map_err(|_| AppError::Validation("id must be an integer".to_owned()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShopData {
    pub new_shop: Shop,
}

#[derive(Debug, Serialize)]
pub struct ShopsData {
    pub shops: Vec<ShopListing>,
}

/// Single-shop payload; the key is capitalised on the wire.
#[derive(Debug, Serialize)]
pub struct ShopData {
    #[serde(rename = "Shop")]
    pub shop: Option<Shop>,
}

/// Create a shop.
///
/// POST /shops
///
/// # Errors
///
/// Returns `AppError::Validation` for a malformed body and
/// `AppError::Database` if the database rejects the row.
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateShopRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<NewShopData>>)> {
    let Json(request) = body?;
    let new_shop = request.validate()?;

    let created = state.shops().create(&new_shop).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(
            "Success create new Shop",
            NewShopData { new_shop: created },
        )),
    ))
}

/// List shops with optional filters and pagination.
///
/// GET /shops?shopName=&productName=&stock=&limit=&page=
///
/// # Errors
///
/// Returns `AppError::NotFound` when the page is past the end.
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ShopListQuery>, QueryRejection>,
) -> Result<Json<Envelope<ShopsData>>> {
    let Query(query) = query?;
    let (filter, page) = query.parse()?;

    let result = state.shops().list(&filter, page).await?;

    Ok(Json(
        Envelope::success(
            "Success get shops data",
            ShopsData {
                shops: result.shops,
            },
        )
        .with_pagination(result.pagination),
    ))
}

/// Get one shop; an unknown id yields `Shop: null`.
///
/// GET /shops/{id}
///
/// # Errors
///
/// Returns `AppError::Validation` if `id` is not an integer.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ShopData>>> {
    let id = parse_id(&id)?;
    let shop = state.shops().get(id).await?;

    Ok(Json(Envelope::success(
        "Success get shop data",
        ShopData { shop },
    )))
}

/// Update name and/or admin email of one shop.
///
/// PUT /shops/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no shop has this id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateShopRequest>, JsonRejection>,
) -> Result<Json<Envelope<ShopData>>> {
    let id = parse_id(&id)?;
    let Json(request) = body?;
    let changes = request.validate()?;

    let updated = state.shops().update(id, &changes).await?;

    Ok(Json(Envelope::success(
        "Success update shop",
        ShopData {
            shop: Some(updated),
        },
    )))
}

/// Delete one shop and its products.
///
/// DELETE /shops/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no shop has this id.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>> {
    let id = parse_id(&id)?;
    state.shops().delete(id).await?;

    Ok(Json(Envelope::empty("Success delete shop")))
}
