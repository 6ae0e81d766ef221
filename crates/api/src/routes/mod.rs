//! HTTP route handlers for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (database)
//! GET    /api-docs/openapi.json - OpenAPI document
//!
//! # Shops
//! GET    /shops                 - List shops (filters, pagination)
//! POST   /shops                 - Create a shop
//! GET    /shops/{id}            - Get a shop
//! PUT    /shops/{id}            - Update a shop
//! DELETE /shops/{id}            - Delete a shop
//! ```

pub mod docs;
pub mod health;
pub mod shops;

use axum::{Json, Router, http::StatusCode, middleware::from_fn, routing::get};

use crate::middleware::{request_id_middleware, trace_layer};
use crate::models::Envelope;
use crate::state::AppState;

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shops::index).post(shops::create))
        .route(
            "/{id}",
            get(shops::show).put(shops::update).delete(shops::destroy),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api-docs/openapi.json", get(docs::openapi))
        .nest("/shops", shop_routes())
}

/// Build the complete application with middleware and state.
pub fn build_router(state: AppState) -> Router {
    routes()
        .fallback(not_found)
        .layer(from_fn(request_id_middleware))
        .layer(trace_layer())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Route not found")),
    )
}
