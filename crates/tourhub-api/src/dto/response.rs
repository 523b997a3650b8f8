//! Response DTOs.
//!
//! Every success body is wrapped in the envelope
//! `{"status": "success", "token"?, "results"?, "message"?, "data"?}`.

use serde::Serialize;
use serde_json::Value;

use tourhub_entity::review::Review;
use tourhub_entity::tour::Tour;
use tourhub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    /// Session token, on responses that sign a principal in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Number of items, on list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "success",
            token: None,
            results: None,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_token(data: T, token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::ok(data)
        }
    }

    pub fn list(data: T, results: usize) -> Self {
        Self {
            results: Some(results),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    /// Envelope without data.
    pub fn empty() -> Self {
        Self {
            status: "success",
            token: None,
            results: None,
            message: None,
            data: None,
        }
    }

    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersData {
    pub users: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TourData {
    pub tour: Tour,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToursData {
    pub tours: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewData {
    pub review: Review,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsData {
    pub reviews: Vec<Value>,
}

/// Body of the overview page stand-in.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewData {
    /// Signed-in principal, or `null` for anonymous visitors.
    pub user: Option<User>,
    pub tours: Vec<Value>,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
}
