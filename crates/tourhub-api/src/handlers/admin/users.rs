//! Admin user management handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use tourhub_core::error::AppError;
use tourhub_core::query;
use tourhub_core::types::FilterField;
use tourhub_database::SaveOptions;
use tourhub_entity::user::model::normalize_email;

use crate::dto::request::AdminUpdateUserRequest;
use crate::dto::response::{ApiResponse, UserData, UsersData};
use crate::error::ApiResult;
use crate::extractors::ValidJson;
use crate::handlers::parse_id;
use crate::state::AppState;

/// GET /api/v1/users
///
/// Deactivated accounts are never listed.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<UsersData>>> {
    let spec = query::build(&params).with_condition(FilterField::eq("active", "true"));
    let users = state.users.find(&spec).await?;
    let results = users.len();
    Ok(Json(ApiResponse::list(UsersData { users }, results)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    let user = state
        .users
        .find_by_id(&parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found("No user found with that ID"))?;
    Ok(Json(ApiResponse::ok(UserData { user })))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<AdminUpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    let mut user = state
        .users
        .find_by_id(&parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found("No user found with that ID"))?;

    if let Some(name) = req.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = req.email {
        user.email = normalize_email(&email);
    }
    if let Some(role) = req.role {
        user.role = role;
    }

    let user = state.users.save(&user, SaveOptions::default()).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User updated by admin");
    Ok(Json(ApiResponse::ok(UserData { user })))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.users.delete(&parse_id(&id)?).await? {
        return Err(AppError::not_found("No user found with that ID").into());
    }
    Ok(StatusCode::NO_CONTENT)
}
