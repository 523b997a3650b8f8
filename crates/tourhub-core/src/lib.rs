//! # tourhub-core
//!
//! Core crate for TourHub. Contains configuration schemas, the unified
//! error system, the list query builder and its filter/sort/projection
//! types, and the store and mailer traits.
//!
//! This crate has **no** internal dependencies on other TourHub crates.

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use query::QuerySpec;
pub use result::AppResult;
