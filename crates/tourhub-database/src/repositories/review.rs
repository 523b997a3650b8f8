//! Review repository implementation.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::QuerySpec;
use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::review::Review;

use super::map_write_error;
use crate::schema::REVIEWS;
use crate::sql::select_documents;

const AUTHOR_CONSTRAINT: &str = "reviews_tour_user_key";
const DUPLICATE: &str = "You have already reviewed this tour";

/// Repository for reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Review, Uuid> for ReviewRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find review by id", e)
            })
    }

    async fn create(&self, review: &Review) -> AppResult<Review> {
        review.validate()?;
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, review, rating, tour_id, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(review.id)
        .bind(&review.review)
        .bind(review.rating)
        .bind(review.tour)
        .bind(review.user)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, AUTHOR_CONSTRAINT, DUPLICATE, "Failed to create review"))
    }

    async fn update(&self, review: &Review) -> AppResult<Review> {
        review.validate()?;
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET review = $2, rating = $3 WHERE id = $1 RETURNING *",
        )
        .bind(review.id)
        .bind(&review.review)
        .bind(review.rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update review", e))?
        .ok_or_else(|| AppError::not_found("No review found with that ID"))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Collection for ReviewRepository {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let mut query = select_documents(&REVIEWS, spec)?;
        query
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))
    }
}
