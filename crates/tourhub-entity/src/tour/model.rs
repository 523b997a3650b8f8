//! Tour entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use tourhub_core::{AppError, AppResult};

use super::difficulty::Difficulty;

/// Rating given to a tour before it has any reviews.
pub const DEFAULT_RATING: f64 = 4.5;

/// A bookable tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// URL slug derived from the name.
    pub slug: String,
    /// Length in days.
    pub duration: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    /// Average review rating, rounded to one decimal.
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub price: f64,
    /// Discounted price, always below `price`.
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    /// Hidden from public listings.
    pub secret_tour: bool,
    pub created_at: DateTime<Utc>,
    /// Internal version counter, incremented on every update.
    pub revision: i64,
}

/// Data required to create a tour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTour {
    pub name: String,
    pub duration: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub ratings_average: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub price_discount: Option<f64>,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub secret_tour: bool,
}

/// Partial update of a tour. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTour {
    pub name: Option<String>,
    pub duration: Option<i32>,
    pub max_group_size: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub ratings_average: Option<f64>,
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub secret_tour: Option<bool>,
}

impl Tour {
    /// Build a tour from creation input.
    pub fn new(input: CreateTour, now: DateTime<Utc>) -> AppResult<Self> {
        let name = input.name.trim().to_string();
        let tour = Self {
            id: Uuid::now_v7(),
            slug: slugify(&name),
            name,
            duration: input.duration,
            max_group_size: input.max_group_size,
            difficulty: input.difficulty,
            ratings_average: round_rating(input.ratings_average.unwrap_or(DEFAULT_RATING)),
            ratings_quantity: 0,
            price: input.price,
            price_discount: input.price_discount,
            summary: input.summary.trim().to_string(),
            description: input.description.map(|d| d.trim().to_string()),
            secret_tour: input.secret_tour,
            created_at: now,
            revision: 0,
        };
        tour.validate()?;
        Ok(tour)
    }

    /// Apply a partial update and bump the revision.
    pub fn apply(&mut self, patch: UpdateTour) -> AppResult<()> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
            self.slug = slugify(&self.name);
        }
        if let Some(v) = patch.duration {
            self.duration = v;
        }
        if let Some(v) = patch.max_group_size {
            self.max_group_size = v;
        }
        if let Some(v) = patch.difficulty {
            self.difficulty = v;
        }
        if let Some(v) = patch.ratings_average {
            self.ratings_average = round_rating(v);
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.price_discount {
            self.price_discount = Some(v);
        }
        if let Some(v) = patch.summary {
            self.summary = v.trim().to_string();
        }
        if let Some(v) = patch.description {
            self.description = Some(v.trim().to_string());
        }
        if let Some(v) = patch.secret_tour {
            self.secret_tour = v;
        }
        self.validate()?;
        self.revision += 1;
        Ok(())
    }

    /// Check field invariants.
    pub fn validate(&self) -> AppResult<()> {
        let name_len = self.name.chars().count();
        if !(5..=40).contains(&name_len) {
            return Err(AppError::validation(
                "A tour name must have between 5 and 40 characters",
            ));
        }
        if self.summary.is_empty() {
            return Err(AppError::validation("A tour must have a summary"));
        }
        if self.duration <= 0 || self.max_group_size <= 0 {
            return Err(AppError::validation(
                "Duration and group size must be positive",
            ));
        }
        if !(1.0..=5.0).contains(&self.ratings_average) {
            return Err(AppError::validation("Rating must be between 1.0 and 5.0"));
        }
        if self.price < 0.0 {
            return Err(AppError::validation("Price must not be negative"));
        }
        if self.price_discount.is_some_and(|d| d >= self.price) {
            return Err(AppError::validation(
                "Discount price should be below regular price",
            ));
        }
        Ok(())
    }
}

/// Lowercase, hyphen-separated form of a name.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
