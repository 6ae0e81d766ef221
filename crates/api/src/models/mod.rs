//! Domain and wire models for the shop API.

pub mod envelope;
pub mod shop;
pub mod validation;

pub use envelope::{Envelope, Status};
pub use shop::{
    CreateShopRequest, NewShop, OwnerSummary, ProductSummary, Shop, ShopChanges, ShopFilter,
    ShopListing, UpdateShopRequest,
};
pub use validation::ValidationErrors;
