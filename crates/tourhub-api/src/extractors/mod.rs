//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod token;

pub use auth::{AuthUser, CurrentUser, MaybeUser};
pub use json::{JsonBody, ValidJson};
pub use token::session_token;
