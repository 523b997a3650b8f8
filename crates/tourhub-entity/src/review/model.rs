//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use tourhub_core::{AppError, AppResult};

/// A principal's review of one tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    /// Review text.
    pub review: String,
    /// Score from 1 to 5, if given.
    pub rating: Option<f64>,
    /// Reviewed tour.
    #[sqlx(rename = "tour_id")]
    pub tour: Uuid,
    /// Author.
    #[sqlx(rename = "user_id")]
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Review body sent by a client. The author always comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub review: String,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Required unless the tour is named by the route.
    #[serde(default)]
    pub tour: Option<Uuid>,
}

/// Partial update of a review. Tour and author are fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    pub review: Option<String>,
    pub rating: Option<f64>,
}

impl Review {
    /// Build a review of `tour` written by `user`.
    pub fn new(input: CreateReview, tour: Uuid, user: Uuid, now: DateTime<Utc>) -> AppResult<Self> {
        let review = Self {
            id: Uuid::now_v7(),
            review: input.review.trim().to_string(),
            rating: input.rating,
            tour,
            user,
            created_at: now,
        };
        review.validate()?;
        Ok(review)
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: UpdateReview) -> AppResult<()> {
        if let Some(text) = patch.review {
            self.review = text.trim().to_string();
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        self.validate()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.review.is_empty() {
            return Err(AppError::validation("Review can not be empty"));
        }
        if self.rating.is_some_and(|r| !(1.0..=5.0).contains(&r)) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }
        Ok(())
    }
}
