//! Principal extractors.
//!
//! The access-control middleware resolves the principal and stores it as a
//! [`CurrentUser`] request extension. Handlers read it back with
//! [`AuthUser`] (required) or [`MaybeUser`] (optional).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tourhub_core::error::AppError;
use tourhub_entity::user::User;

use crate::error::ApiError;

/// Principal attached to a request by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticated principal. Rejects with 401 when no principal is attached.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|current| AuthUser(current.0.clone()))
            .ok_or_else(|| {
                ApiError(AppError::unauthenticated(
                    "You are not logged in! Please log in to get access.",
                ))
            })
    }
}

/// Principal if one was identified, otherwise `None`.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts
                .extensions
                .get::<CurrentUser>()
                .map(|current| current.0.clone()),
        ))
    }
}
