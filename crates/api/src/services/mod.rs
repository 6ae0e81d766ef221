//! Use-case services sitting between route handlers and repositories.

pub mod shops;

pub use shops::{ShopPage, ShopService, ShopStore};
