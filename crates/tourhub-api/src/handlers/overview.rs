//! Overview page stand-in for the render path.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, OverviewData};
use crate::error::ApiResult;
use crate::extractors::MaybeUser;
use crate::handlers::tours::public_tours;
use crate::state::AppState;

/// GET /overview
///
/// Served behind the soft-identify stage: signed-in visitors get their
/// principal back, anonymous visitors get `null`.
pub async fn overview(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Json<ApiResponse<OverviewData>>> {
    let tours = public_tours(&state, &HashMap::new()).await?;
    Ok(Json(ApiResponse::ok(OverviewData { user, tours })))
}
