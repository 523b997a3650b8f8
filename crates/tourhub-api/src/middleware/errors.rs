//! Development error rendering.

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ErrorReport;

/// Re-render error responses with their real message and diagnostics.
///
/// Only layered outside production.
pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let status = response.status();
    let mut detailed = (status, Json(report.detailed_body())).into_response();
    detailed.extensions_mut().insert(report);
    detailed
}
