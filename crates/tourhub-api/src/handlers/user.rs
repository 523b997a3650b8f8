//! Self-service handlers for the signed-in principal.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tourhub_core::error::AppError;
use tourhub_database::SaveOptions;
use tourhub_entity::user::model::normalize_email;

use crate::dto::request::UpdateMeRequest;
use crate::dto::response::{ApiResponse, UserData};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn get_me(auth: AuthUser) -> Json<ApiResponse<UserData>> {
    Json(ApiResponse::ok(UserData { user: auth.0 }))
}

/// PATCH /api/v1/users/updateMe
///
/// Only `name` and `email` may change here; password changes go through
/// `updateMyPassword`.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<UpdateMeRequest>,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    if req.touches_password() {
        return Err(AppError::malformed_input(
            "This route is not for password updates. Please use /updateMyPassword.",
        )
        .into());
    }

    let mut user = state
        .users
        .find_by_id(&auth.id)
        .await?
        .ok_or_else(|| AppError::not_found("No user found with that ID"))?;
    if let Some(name) = req.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = req.email {
        user.email = normalize_email(&email);
    }

    let user = state.users.save(&user, SaveOptions::default()).await?;
    Ok(Json(ApiResponse::ok(UserData { user })))
}

/// DELETE /api/v1/users/deleteMe
///
/// Deactivates the account; the record is kept.
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    let mut user = auth.0;
    user.active = false;
    state.users.save(&user, SaveOptions::skip_validation()).await?;
    tracing::info!(user_id = %user.id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}
