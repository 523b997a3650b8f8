//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tourhub_core::error::{AppError, ErrorKind};

/// Message shown in place of non-operational errors.
pub const GENERIC_MESSAGE: &str = "Something went wrong!";

/// Handler-facing error. Wraps [`AppError`] so it can be rendered.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type returned by handlers and middleware.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// `"fail"` for client errors, `"error"` for server errors.
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Diagnostic detail, only rendered in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Diagnostic detail for development responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub status_code: u16,
    pub is_operational: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Copy of the rendered error, attached to the response extensions so
/// outer layers can re-render it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<String>,
}

impl ErrorReport {
    fn from_error(err: &AppError) -> Self {
        Self {
            kind: err.kind,
            message: err.message.clone(),
            source: err.source.as_ref().map(|s| s.to_string()),
        }
    }

    /// Body that reveals the real message and its diagnostics.
    pub fn detailed_body(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            status: status_word(self.kind.status_code()),
            message: self.message.clone(),
            error: Some(ErrorDetail {
                kind: self.kind,
                status_code: self.kind.status_code(),
                is_operational: self.kind.is_operational(),
                source: self.source.clone(),
            }),
        }
    }
}

fn status_word(code: u16) -> &'static str {
    if code < 500 { "fail" } else { "error" }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if err.is_operational() {
            err.message.clone()
        } else {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Internal server error"
            );
            GENERIC_MESSAGE.to_string()
        };

        let body = ApiErrorResponse {
            status: status_word(status.as_u16()),
            message,
            error: None,
        };

        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(ErrorReport::from_error(&err));
        response
    }
}
