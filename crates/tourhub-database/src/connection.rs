//! PostgreSQL connection pool shared by the repositories.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use tourhub_core::config::DatabaseConfig;
use tourhub_core::error::{AppError, ErrorKind};

use crate::repositories::{ReviewRepository, TourRepository, UserRepository};

/// Shared sqlx pool. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    ///
    /// Only host, port, and database name are logged; credentials in the
    /// URL never reach the log.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(&config.url)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to connect to database", e)
            })?;

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        crate::migration::apply(&self.pool).await
    }

    /// User, tour, and review repositories sharing this pool.
    pub fn repositories(&self) -> (UserRepository, TourRepository, ReviewRepository) {
        (
            UserRepository::new(self.pool.clone()),
            TourRepository::new(self.pool.clone()),
            ReviewRepository::new(self.pool.clone()),
        )
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn connect_options(url: &str) -> Result<PgConnectOptions, AppError> {
    url.parse::<PgConnectOptions>().map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "Invalid database url", e)
    })
}
