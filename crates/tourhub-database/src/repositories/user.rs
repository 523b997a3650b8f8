//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::QuerySpec;
use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::user::User;
use tourhub_entity::user::model::normalize_email;

use super::map_write_error;
use crate::schema::USERS;
use crate::sql::select_documents;
use crate::store::{SaveOptions, UserStore};

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Repository for principal records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User, Uuid> for UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        user.validate()?;
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, photo, role, password_hash, \
             password_changed_at, active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo)
        .bind(user.role)
        .bind(&user.password_hash)
        .bind(user.password_changed_at)
        .bind(user.active)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                EMAIL_CONSTRAINT,
                format!("Email '{}' is already registered", user.email),
                "Failed to create user",
            )
        })
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        self.save(user, SaveOptions::default()).await
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Collection for UserRepository {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let mut query = select_documents(&USERS, spec)?;
        query
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn redeem_reset_token(
        &self,
        digest: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        // Single conditional write: a second redeem finds the token gone.
        sqlx::query_as::<_, User>(
            "UPDATE users SET password_hash = $3, password_changed_at = $2, \
             password_reset_token = NULL, password_reset_expires = NULL \
             WHERE password_reset_token = $1 AND password_reset_expires > $2 AND active \
             RETURNING *",
        )
        .bind(digest)
        .bind(now)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to redeem reset token", e)
        })
    }

    async fn save(&self, user: &User, options: SaveOptions) -> AppResult<User> {
        if options.validate {
            user.validate()?;
        }
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, email = $3, photo = $4, role = $5, \
             password_hash = $6, password_changed_at = $7, password_reset_token = $8, \
             password_reset_expires = $9, active = $10 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo)
        .bind(user.role)
        .bind(&user.password_hash)
        .bind(user.password_changed_at)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_expires)
        .bind(user.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                EMAIL_CONSTRAINT,
                format!("Email '{}' is already registered", user.email),
                "Failed to update user",
            )
        })?
        .ok_or_else(|| AppError::not_found("No user found with that ID"))
    }
}
