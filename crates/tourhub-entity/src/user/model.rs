//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use tourhub_core::{AppError, AppResult};

use super::role::UserRole;

/// Profile photo assigned to new accounts.
pub const DEFAULT_PHOTO: &str = "default.jpg";

/// A registered principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique, lowercased email address.
    pub email: String,
    /// Profile photo file name.
    pub photo: String,
    /// Role used by route gates.
    pub role: UserRole,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the password was last changed. `None` until the first change
    /// after signup.
    #[serde(skip_serializing, default)]
    pub password_changed_at: Option<DateTime<Utc>>,
    /// SHA-256 hex digest of the active reset token.
    #[serde(skip_serializing, default)]
    pub password_reset_token: Option<String>,
    /// Expiry of the active reset token.
    #[serde(skip_serializing, default)]
    pub password_reset_expires: Option<DateTime<Utc>>,
    /// `false` once the account has been deactivated.
    #[serde(skip_serializing, default = "default_active")]
    pub active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new active account with role `user`.
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: normalize_email(email),
            photo: DEFAULT_PHOTO.to_string(),
            role: UserRole::User,
            password_hash,
            password_changed_at: None,
            password_reset_token: None,
            password_reset_expires: None,
            active: true,
            created_at: now,
        }
    }

    /// Replace the password hash of an existing account.
    pub fn set_password(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.password_changed_at = Some(now);
    }

    /// Whether the password changed after a token issued at `issued_at`
    /// (Unix seconds).
    ///
    /// Token times carry whole seconds, so a token issued in the second of
    /// the change is still accepted; any earlier second is not.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        self.password_changed_at
            .is_some_and(|changed| issued_at < changed.timestamp())
    }

    /// Store a reset token digest with its expiry, replacing any previous one.
    pub fn set_reset_token(&mut self, digest: String, expires_at: DateTime<Utc>) {
        self.password_reset_token = Some(digest);
        self.password_reset_expires = Some(expires_at);
    }

    /// Remove the reset token digest and expiry.
    pub fn clear_reset_token(&mut self) {
        self.password_reset_token = None;
        self.password_reset_expires = None;
    }

    /// Whether the stored reset token is still within its lifetime.
    pub fn reset_token_live(&self, now: DateTime<Utc>) -> bool {
        self.password_reset_token.is_some()
            && self.password_reset_expires.is_some_and(|exp| exp > now)
    }

    /// Check profile field invariants.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Please tell us your name!"));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::validation("Please provide a valid email"));
        }
        Ok(())
    }
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted
/// domain.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn default_active() -> bool {
    true
}
