//! Tour handlers.
//!
//! Listing goes through the query builder. Secret tours are excluded from
//! every public read by an explicit default predicate.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;

use tourhub_core::error::AppError;
use tourhub_core::query;
use tourhub_core::types::FilterField;
use tourhub_entity::tour::{CreateTour, Tour, UpdateTour};

use crate::dto::response::{ApiResponse, TourData, ToursData};
use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::state::AppState;

const NOT_FOUND: &str = "No tour found with that ID";

/// Preset parameters of the top-5-cheap alias.
const TOP_CHEAP: [(&str, &str); 3] = [
    ("limit", "5"),
    ("sort", "-ratingsAverage,price"),
    ("fields", "name,price,ratingsAverage,summary,difficulty"),
];

/// List public tours matching `params`.
pub(crate) async fn public_tours(
    state: &AppState,
    params: &HashMap<String, String>,
) -> ApiResult<Vec<serde_json::Value>> {
    let spec = query::build(params).with_condition(FilterField::eq("secretTour", "false"));
    Ok(state.tours.find(&spec).await?)
}

/// GET /api/v1/tours
pub async fn list_tours(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<ToursData>>> {
    let tours = public_tours(&state, &params).await?;
    let results = tours.len();
    Ok(Json(ApiResponse::list(ToursData { tours }, results)))
}

/// GET /api/v1/tours/top-5-cheap
///
/// The preset overrides any client-supplied limit, sort, or fields.
pub async fn top_cheap(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<ToursData>>> {
    for (key, value) in TOP_CHEAP {
        params.insert(key.to_string(), value.to_string());
    }
    let tours = public_tours(&state, &params).await?;
    let results = tours.len();
    Ok(Json(ApiResponse::list(ToursData { tours }, results)))
}

/// GET /api/v1/tours/{id}
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TourData>>> {
    let tour = state
        .tours
        .find_by_id(&parse_id(&id)?)
        .await?
        .filter(|t| !t.secret_tour)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(TourData { tour })))
}

/// POST /api/v1/tours
pub async fn create_tour(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTour>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TourData>>)> {
    let tour = state.tours.create(&Tour::new(input, Utc::now())?).await?;
    tracing::info!(tour_id = %tour.id, name = %tour.name, "Tour created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(TourData { tour }))))
}

/// PATCH /api/v1/tours/{id}
pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<UpdateTour>,
) -> ApiResult<Json<ApiResponse<TourData>>> {
    let mut tour = state
        .tours
        .find_by_id(&parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    tour.apply(patch)?;
    let tour = state.tours.update(&tour).await?;
    Ok(Json(ApiResponse::ok(TourData { tour })))
}

/// DELETE /api/v1/tours/{id}
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.tours.delete(&parse_id(&id)?).await? {
        return Err(AppError::not_found(NOT_FOUND).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
