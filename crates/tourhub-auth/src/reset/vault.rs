//! Reset token issuance and single-use consumption.
//!
//! One token is active per principal. Issuing overwrites the stored
//! digest without coordination, so of two concurrent requests the last
//! write decides which link works.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use tourhub_core::config::AuthConfig;
use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_database::store::{SaveOptions, UserStore};
use tourhub_entity::user::User;

use super::token::{ResetToken, digest};
use crate::password::PasswordHasher;

/// Stores reset token digests on principal records and redeems them.
#[derive(Clone)]
pub struct ResetTokenVault {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    ttl: Duration,
}

impl std::fmt::Debug for ResetTokenVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetTokenVault")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ResetTokenVault {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher,
            ttl: Duration::seconds(config.reset_token_ttl_seconds()),
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user` and return its plain value.
    ///
    /// Replaces any outstanding token. Concurrent calls for the same
    /// principal are last-write-wins: only the token saved last redeems.
    pub async fn issue(&self, user: &mut User) -> AppResult<String> {
        self.issue_at(user, Utc::now()).await
    }

    /// [`issue`](Self::issue) with an explicit clock.
    pub async fn issue_at(&self, user: &mut User, now: DateTime<Utc>) -> AppResult<String> {
        let token = ResetToken::generate()?;
        user.set_reset_token(token.digest().to_string(), now + self.ttl);
        *user = self.users.save(user, SaveOptions::skip_validation()).await?;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(token.into_plain())
    }

    /// Redeem `plain` and set `new_password` on the matching principal.
    pub async fn consume(&self, plain: &str, new_password: &str) -> AppResult<User> {
        self.consume_at(plain, new_password, Utc::now()).await
    }

    /// [`consume`](Self::consume) with an explicit clock.
    pub async fn consume_at(
        &self,
        plain: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<User> {
        // Only the digest reaches the store; check and clear are one call.
        let password_hash = self.hasher.hash(new_password).await?;
        let user = self
            .users
            .redeem_reset_token(&digest(plain), password_hash, now)
            .await?
            .ok_or_else(|| AppError::invalid_or_expired_token("Token is invalid or has expired"))?;

        info!(user_id = %user.id, "Password reset completed");
        Ok(user)
    }

    /// Drop the active token of `user`, e.g. after its delivery failed.
    pub async fn clear(&self, user: &mut User) -> AppResult<()> {
        user.clear_reset_token();
        *user = self.users.save(user, SaveOptions::skip_validation()).await?;
        info!(user_id = %user.id, "Password reset token cleared");
        Ok(())
    }
}
