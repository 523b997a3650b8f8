//! # tourhub-database
//!
//! Store traits for principals, tours, and reviews, with a PostgreSQL backend that
//! translates list queries into parameterised SQL and an in-memory backend
//! that evaluates them over JSON documents.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod schema;
pub mod sql;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryReviewStore, MemoryTourStore, MemoryUserStore};
pub use store::{ReviewStore, SaveOptions, TourStore, UserStore};
