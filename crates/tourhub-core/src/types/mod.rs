//! Core type definitions used across the TourHub workspace.

pub mod filter;
pub mod pagination;
pub mod projection;
pub mod sorting;

pub use filter::{Filter, FilterField, FilterOp, FilterValue};
pub use pagination::PageRequest;
pub use projection::Projection;
pub use sorting::{SortDirection, SortField};
