//! Shopline Core - Shared types library.
//!
//! This crate provides common types used across all Shopline components:
//! - `api` - The shop REST API server
//! - `cli` - Command-line tools for migrations and demo data
//!
//! # Architecture
//!
//! The core crate contains only types and pure computations - no I/O, no
//! database access, no HTTP. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and email addresses
//! - [`pagination`] - Offset pagination requests and page metadata

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pagination;
pub mod types;

pub use pagination::{PageDescriptor, PageError, PageMeta, PageRequest};
pub use types::*;
