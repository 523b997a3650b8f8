//! Account flows: signup, login, password reset, and password change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use tourhub_core::config::AuthConfig;
use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_core::traits::{MailMessage, Mailer, Recipient};
use tourhub_database::store::{SaveOptions, UserStore};
use tourhub_entity::user::User;

use crate::jwt::JwtEncoder;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::reset::ResetTokenVault;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// A signed-in principal with its session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Input for [`AuthService::signup`].
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Runs every flow that creates or rotates credentials.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    encoder: JwtEncoder,
    vault: ResetTokenVault,
    /// Base URL used in links sent by mail.
    public_url: String,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("public_url", &self.public_url)
            .field("vault", &self.vault)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates the service with all required dependencies.
    pub fn new(
        config: &AuthConfig,
        public_url: impl Into<String>,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            vault: ResetTokenVault::new(users.clone(), hasher.clone(), config),
            encoder: JwtEncoder::new(config),
            validator: PasswordValidator::new(config),
            users,
            mailer,
            hasher,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register a new principal with role `user` and sign it in.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthSession> {
        self.validator
            .validate(&input.password, &input.password_confirm)?;

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = self
            .users
            .create(&User::new(
                input.name.trim(),
                &input.email,
                password_hash,
                Utc::now(),
            ))
            .await?;
        info!(user_id = %user.id, "User signed up");

        let welcome = MailMessage::welcome(
            Recipient::new(&user.name, &user.email),
            &format!("{}/me", self.public_url),
        );
        if let Err(e) = self.mailer.send(&welcome).await {
            warn!(user_id = %user.id, error = %e, "Failed to send welcome email");
        }

        self.issue_session(user)
    }

    /// Verify credentials and sign in.
    ///
    /// Unknown email, deactivated account, and wrong password produce the
    /// same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::malformed_input(
                "Please provide email and password!",
            ));
        }

        let Some(user) = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| u.active)
        else {
            return Err(AppError::unauthenticated(BAD_CREDENTIALS));
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::unauthenticated(BAD_CREDENTIALS));
        }

        info!(user_id = %user.id, "Login successful");
        self.issue_session(user)
    }

    /// Issue a reset token and mail the link `{reset_url_base}/{token}`.
    ///
    /// If delivery fails the token is cleared before the error is returned,
    /// so an undelivered link can never be redeemed.
    pub async fn forgot_password(&self, email: &str, reset_url_base: &str) -> AppResult<()> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| u.active)
            .ok_or_else(|| AppError::not_found("There is no user with that email address."))?;

        let plain = self.vault.issue(&mut user).await?;
        let reset_url = format!("{}/{plain}", reset_url_base.trim_end_matches('/'));
        let message = MailMessage::password_reset(
            Recipient::new(&user.name, &user.email),
            &reset_url,
            self.vault.ttl().num_minutes().max(0) as u64,
        );

        if let Err(e) = self.mailer.send(&message).await {
            error!(user_id = %user.id, error = %e, "Failed to deliver password reset email");
            // Rollback: the token must not outlive a failed delivery.
            self.vault.clear(&mut user).await?;
            return Err(AppError::delivery(
                "There was an error sending the email. Try again later!",
            ));
        }

        info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Redeem a reset token, set the new password, and sign in.
    pub async fn reset_password(
        &self,
        plain: &str,
        password: &str,
        password_confirm: &str,
    ) -> AppResult<AuthSession> {
        self.validator.validate(password, password_confirm)?;
        let user = self.vault.consume(plain, password).await?;
        self.issue_session(user)
    }

    /// Change the password of a signed-in principal.
    pub async fn update_password(
        &self,
        principal: &User,
        current: &str,
        password: &str,
        password_confirm: &str,
    ) -> AppResult<AuthSession> {
        let mut user = self
            .users
            .find_by_id(&principal.id)
            .await?
            .ok_or_else(|| AppError::not_found("No user found with that ID"))?;

        if !self.hasher.verify(current, &user.password_hash).await? {
            return Err(AppError::unauthenticated("Your current password is wrong."));
        }
        self.validator.validate(password, password_confirm)?;

        let password_hash = self.hasher.hash(password).await?;
        user.set_password(password_hash, Utc::now());
        let user = self.users.save(&user, SaveOptions::default()).await?;

        info!(user_id = %user.id, "Password changed");
        self.issue_session(user)
    }

    fn issue_session(&self, user: User) -> AppResult<AuthSession> {
        let issued = self.encoder.issue(user.id)?;
        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.claims.expires_at().unwrap_or_else(Utc::now),
            user,
        })
    }
}
