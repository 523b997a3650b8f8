//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tourhub_api::{AppState, build_app};
use tourhub_core::config::AppConfig;
use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_core::traits::{MailMessage, Mailer, Repository};
use tourhub_database::{MemoryReviewStore, MemoryTourStore, MemoryUserStore, SaveOptions, UserStore};
use tourhub_entity::tour::{CreateTour, Difficulty, Tour};
use tourhub_entity::user::UserRole;

pub const PASSWORD: &str = "pass1234";

/// Mailer that keeps every message and can be switched to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn fail_deliveries(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::delivery("relay unavailable"));
        }
        self.sent.lock().expect("mailer lock").push(message.clone());
        Ok(())
    }
}

/// Response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn token(&self) -> String {
        self.body["token"]
            .as_str()
            .expect("response carries a token")
            .to_string()
    }
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
    pub users: Arc<MemoryUserStore>,
    pub tours: Arc<MemoryTourStore>,
    pub reviews: Arc<MemoryReviewStore>,
    pub mailer: Arc<RecordingMailer>,
}

/// Configuration with a fast hasher.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.hash_memory_kib = 1024;
    config.auth.hash_iterations = 1;
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let tours = Arc::new(MemoryTourStore::new());
        let reviews = Arc::new(MemoryReviewStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(
            config.clone(),
            users.clone(),
            tours.clone(),
            reviews.clone(),
            mailer.clone(),
        )
        .expect("Failed to build state");

        Self {
            router: build_app(state),
            config,
            users,
            tours,
            reviews,
            mailer,
        }
    }

    /// Send a JSON request, optionally with a bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Sign up and return the session token with the new user's id.
    pub async fn signup(&self, email: &str) -> (String, Uuid) {
        let response = self
            .request(
                "POST",
                "/api/v1/users/signup",
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": PASSWORD,
                    "passwordConfirm": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        let id = response.body["data"]["user"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("user id");
        (response.token(), id)
    }

    /// Sign up and promote the account to `role`.
    pub async fn signup_as(&self, email: &str, role: UserRole) -> String {
        let (token, id) = self.signup(email).await;
        let mut user = self
            .users
            .find_by_id(&id)
            .await
            .expect("store read")
            .expect("user exists");
        user.role = role;
        self.users
            .save(&user, SaveOptions::default())
            .await
            .expect("store write");
        token
    }

    /// Insert a tour directly into the store.
    pub async fn insert_tour(&self, name: &str, price: f64, rating: f64, secret: bool) -> Tour {
        let tour = Tour::new(
            CreateTour {
                name: name.to_string(),
                duration: 5,
                max_group_size: 10,
                difficulty: Difficulty::Easy,
                ratings_average: Some(rating),
                price,
                price_discount: None,
                summary: format!("{name} summary"),
                description: None,
                secret_tour: secret,
            },
            Utc::now(),
        )
        .expect("valid tour");
        self.tours.create(&tour).await.expect("store write")
    }

    /// Plain reset tokens taken from the links in sent mail.
    pub fn reset_tokens(&self) -> Vec<String> {
        const MARKER: &str = "/resetPassword/";
        self.mailer
            .sent()
            .iter()
            .filter_map(|m| {
                let start = m.text.find(MARKER)? + MARKER.len();
                Some(
                    m.text[start..]
                        .chars()
                        .take_while(char::is_ascii_hexdigit)
                        .collect(),
                )
            })
            .collect()
    }
}
