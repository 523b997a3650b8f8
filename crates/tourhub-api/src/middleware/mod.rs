//! Axum middleware stack.

pub mod auth;
pub mod cors;
pub mod errors;
pub mod logging;
pub mod rbac;

pub use auth::{is_logged_in, protect};
pub use rbac::{AllowedRoles, restrict_to};
