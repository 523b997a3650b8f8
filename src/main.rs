//! TourHub Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tourhub_api::AppState;
use tourhub_core::config::{AppConfig, DatabaseProvider};
use tourhub_core::result::AppResult;
use tourhub_database::{
    DatabasePool, MemoryReviewStore, MemoryTourStore, MemoryUserStore, ReviewStore, TourStore,
    UserStore,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("TOURHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> AppResult<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Starting TourHub"
    );

    // ── Step 1: Stores ───────────────────────────────────────────
    let (users, tours, reviews, pool): (
        Arc<dyn UserStore>,
        Arc<dyn TourStore>,
        Arc<dyn ReviewStore>,
        Option<DatabasePool>,
    ) = match config.database.provider {
        DatabaseProvider::Memory => {
            warn!("Using in-memory store; all data is lost on shutdown");
            (
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryTourStore::new()),
                Arc::new(MemoryReviewStore::new()),
                None,
            )
        }
        DatabaseProvider::Postgres => {
            info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;
            info!("Running database migrations...");
            pool.migrate().await?;
            let (users, tours, reviews) = pool.repositories();
            (Arc::new(users), Arc::new(tours), Arc::new(reviews), Some(pool))
        }
    };

    // ── Step 2: Mailer ───────────────────────────────────────────
    let mailer = tourhub_mail::build_mailer(&config.mail)?;
    info!(provider = ?config.mail.provider, "Mailer initialized");

    // ── Step 3: State and HTTP server ────────────────────────────
    let state = AppState::new(config, users, tours, reviews, mailer)?;
    tourhub_api::serve(state).await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}
