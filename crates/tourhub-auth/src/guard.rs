//! Principal resolution for incoming requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_database::store::UserStore;
use tourhub_entity::user::{User, UserRole};

use crate::jwt::JwtDecoder;
use crate::rbac::RbacEnforcer;

/// Resolves session tokens to principals and applies role gates.
///
/// Every method is read-only against the store.
#[derive(Clone)]
pub struct AccessGuard {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
    enforcer: RbacEnforcer,
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl AccessGuard {
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self {
            decoder,
            users,
            enforcer: RbacEnforcer::new(),
        }
    }

    /// Resolve `token` to a live principal.
    ///
    /// 1. A token must be present
    /// 2. Signature and expiry must verify
    /// 3. The subject must still exist and be active
    /// 4. The password must not have changed since the token was issued
    pub async fn authenticate(&self, token: Option<&str>) -> AppResult<User> {
        self.authenticate_at(token, Utc::now().timestamp()).await
    }

    /// [`authenticate`](Self::authenticate) with an explicit clock
    /// (seconds since epoch).
    pub async fn authenticate_at(&self, token: Option<&str>, now: i64) -> AppResult<User> {
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            AppError::unauthenticated("You are not logged in! Please log in to get access.")
        })?;

        let claims = self.decoder.verify_at(token, now)?;

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .filter(|u| u.active)
            .ok_or_else(|| {
                AppError::unauthenticated("The user belonging to this token no longer exists.")
            })?;

        if user.changed_password_after(claims.iat) {
            return Err(AppError::unauthenticated(
                "User recently changed password! Please log in again.",
            ));
        }

        Ok(user)
    }

    /// Like [`authenticate`](Self::authenticate) but never fails: any
    /// problem yields an anonymous request.
    pub async fn identify(&self, token: Option<&str>) -> Option<User> {
        token?;
        match self.authenticate(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(reason = %e.message, "Proceeding without a principal");
                None
            }
        }
    }

    /// Fail with `Forbidden` unless the principal's role is in `allowed`.
    pub fn authorize(&self, principal: &User, allowed: &[UserRole]) -> AppResult<()> {
        self.enforcer.require_role(principal, allowed)
    }
}
