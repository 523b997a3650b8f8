//! Generic list query building.
//!
//! [`build`] turns the flat parameter map of a list request into a
//! [`QuerySpec`]; stores execute it through
//! [`Collection`](crate::traits::Collection).

pub mod builder;
pub mod spec;

pub use builder::{DEFAULT_SORT_FIELD, RESERVED_PARAMS, build};
pub use spec::QuerySpec;
