//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod overview;
pub mod reviews;
pub mod tours;
pub mod user;

use uuid::Uuid;

use tourhub_core::error::AppError;

/// Parse a resource id taken from the path.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("Invalid id: {raw}.")))
}
