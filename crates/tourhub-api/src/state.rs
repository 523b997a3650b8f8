//! Shared application state passed to all handlers via Axum's `State`.

use std::sync::Arc;

use tourhub_auth::jwt::JwtDecoder;
use tourhub_auth::{AccessGuard, AuthService, PasswordHasher};
use tourhub_core::config::AppConfig;
use tourhub_core::result::AppResult;
use tourhub_core::traits::Mailer;
use tourhub_database::{ReviewStore, TourStore, UserStore};

/// Application state holding every shared service.
///
/// Cloned per request; all fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Principal store.
    pub users: Arc<dyn UserStore>,
    /// Tour store.
    pub tours: Arc<dyn TourStore>,
    /// Review store.
    pub reviews: Arc<dyn ReviewStore>,
    /// Session token resolution and role gates.
    pub guard: Arc<AccessGuard>,
    /// Account flows.
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wire the auth services over the given stores and mailer.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        tours: Arc<dyn TourStore>,
        reviews: Arc<dyn ReviewStore>,
        mailer: Arc<dyn Mailer>,
    ) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let guard = AccessGuard::new(JwtDecoder::new(&config.auth), users.clone());
        let auth = AuthService::new(
            &config.auth,
            config.server.public_url.clone(),
            users.clone(),
            mailer,
            hasher,
        );

        Ok(Self {
            config: Arc::new(config),
            users,
            tours,
            reviews,
            guard: Arc::new(guard),
            auth: Arc::new(auth),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}
