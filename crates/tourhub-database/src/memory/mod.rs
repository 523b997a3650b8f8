//! In-memory stores backed by `DashMap`.
//!
//! Used by tests and by `database.provider = "memory"`. List queries are
//! evaluated over JSON documents with the same schema catalogue the
//! PostgreSQL repositories use, so both backends accept and reject the
//! same inputs.

pub mod query;
pub mod review;
pub mod tour;
pub mod user;

pub use review::MemoryReviewStore;
pub use tour::MemoryTourStore;
pub use user::MemoryUserStore;
