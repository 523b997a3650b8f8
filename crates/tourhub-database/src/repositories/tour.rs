//! Tour repository implementation.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::QuerySpec;
use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::tour::Tour;

use super::map_write_error;
use crate::schema::TOURS;
use crate::sql::select_documents;

const NAME_CONSTRAINT: &str = "tours_name_key";

/// Repository for tours.
#[derive(Debug, Clone)]
pub struct TourRepository {
    pool: PgPool,
}

impl TourRepository {
    /// Create a new tour repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Tour, Uuid> for TourRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Tour>> {
        sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tour by id", e))
    }

    async fn create(&self, tour: &Tour) -> AppResult<Tour> {
        tour.validate()?;
        sqlx::query_as::<_, Tour>(
            "INSERT INTO tours (id, name, slug, duration, max_group_size, difficulty, \
             ratings_average, ratings_quantity, price, price_discount, summary, description, \
             secret_tour, created_at, revision) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(tour.id)
        .bind(&tour.name)
        .bind(&tour.slug)
        .bind(tour.duration)
        .bind(tour.max_group_size)
        .bind(tour.difficulty)
        .bind(tour.ratings_average)
        .bind(tour.ratings_quantity)
        .bind(tour.price)
        .bind(tour.price_discount)
        .bind(&tour.summary)
        .bind(&tour.description)
        .bind(tour.secret_tour)
        .bind(tour.created_at)
        .bind(tour.revision)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                NAME_CONSTRAINT,
                format!("A tour named '{}' already exists", tour.name),
                "Failed to create tour",
            )
        })
    }

    async fn update(&self, tour: &Tour) -> AppResult<Tour> {
        tour.validate()?;
        sqlx::query_as::<_, Tour>(
            "UPDATE tours SET name = $2, slug = $3, duration = $4, max_group_size = $5, \
             difficulty = $6, ratings_average = $7, ratings_quantity = $8, price = $9, \
             price_discount = $10, summary = $11, description = $12, secret_tour = $13, \
             revision = $14 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(tour.id)
        .bind(&tour.name)
        .bind(&tour.slug)
        .bind(tour.duration)
        .bind(tour.max_group_size)
        .bind(tour.difficulty)
        .bind(tour.ratings_average)
        .bind(tour.ratings_quantity)
        .bind(tour.price)
        .bind(tour.price_discount)
        .bind(&tour.summary)
        .bind(&tour.description)
        .bind(tour.secret_tour)
        .bind(tour.revision)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                NAME_CONSTRAINT,
                format!("A tour named '{}' already exists", tour.name),
                "Failed to update tour",
            )
        })?
        .ok_or_else(|| AppError::not_found("No tour found with that ID"))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tour", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Collection for TourRepository {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let mut query = select_documents(&TOURS, spec)?;
        query
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tours", e))
    }
}
