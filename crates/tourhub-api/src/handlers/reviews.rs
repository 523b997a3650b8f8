//! Review handlers.
//!
//! Reviews are listed through the query builder. Under
//! `/tours/{id}/reviews` the tour from the path becomes a default
//! predicate on reads and the reviewed tour on writes.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::query;
use tourhub_core::types::FilterField;
use tourhub_entity::review::{CreateReview, Review, UpdateReview};
use tourhub_entity::user::{User, UserRole};

use crate::dto::response::{ApiResponse, ReviewData, ReviewsData};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody};
use crate::handlers::parse_id;
use crate::state::AppState;

const NOT_FOUND: &str = "No review found with that ID";

async fn list(
    state: &AppState,
    params: &HashMap<String, String>,
    tour: Option<Uuid>,
) -> ApiResult<Json<ApiResponse<ReviewsData>>> {
    let mut spec = query::build(params);
    if let Some(tour) = tour {
        spec = spec.with_condition(FilterField::eq("tour", tour.to_string()));
    }
    let reviews = state.reviews.find(&spec).await?;
    let results = reviews.len();
    Ok(Json(ApiResponse::list(ReviewsData { reviews }, results)))
}

async fn create(
    state: &AppState,
    author: &User,
    input: CreateReview,
    tour: Option<Uuid>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReviewData>>)> {
    let tour_id = tour
        .or(input.tour)
        .ok_or_else(|| AppError::validation("A review must belong to a tour"))?;
    state
        .tours
        .find_by_id(&tour_id)
        .await?
        .ok_or_else(|| AppError::not_found("No tour found with that ID"))?;

    let review = Review::new(input, tour_id, author.id, Utc::now())?;
    let review = state.reviews.create(&review).await?;
    info!(review_id = %review.id, tour_id = %tour_id, user_id = %author.id, "Review created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ReviewData { review }))))
}

/// Load review `id` for modification by `principal`.
///
/// Admins may change any review; everyone else only their own.
async fn find_editable(state: &AppState, principal: &User, id: &str) -> ApiResult<Review> {
    let review = state
        .reviews
        .find_by_id(&parse_id(id)?)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    if principal.role != UserRole::Admin && review.user != principal.id {
        return Err(AppError::forbidden("You can only change your own reviews").into());
    }
    Ok(review)
}

/// GET /api/v1/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<ReviewsData>>> {
    list(&state, &params, None).await
}

/// GET /api/v1/tours/{id}/reviews
pub async fn list_tour_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<ReviewsData>>> {
    let tour = parse_id(&id)?;
    list(&state, &params, Some(tour)).await
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ReviewData>>> {
    let review = state
        .reviews
        .find_by_id(&parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(ReviewData { review })))
}

/// POST /api/v1/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<CreateReview>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReviewData>>)> {
    create(&state, &auth, input, None).await
}

/// POST /api/v1/tours/{id}/reviews
///
/// The tour in the path wins over one named in the body.
pub async fn create_tour_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CreateReview>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReviewData>>)> {
    let tour = parse_id(&id)?;
    create(&state, &auth, input, Some(tour)).await
}

/// PATCH /api/v1/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<UpdateReview>,
) -> ApiResult<Json<ApiResponse<ReviewData>>> {
    let mut review = find_editable(&state, &auth, &id).await?;
    review.apply(patch)?;
    let review = state.reviews.update(&review).await?;
    Ok(Json(ApiResponse::ok(ReviewData { review })))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let review = find_editable(&state, &auth, &id).await?;
    if !state.reviews.delete(&review.id).await? {
        return Err(AppError::not_found(NOT_FOUND).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
