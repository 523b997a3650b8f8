//! Outbound mail delivery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Addressee of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Display name.
    pub name: String,
    /// Mail address.
    pub email: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// First word of the display name, used in greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: Recipient,
    pub subject: String,
    pub text: String,
}

impl MailMessage {
    /// Greeting sent after signup.
    pub fn welcome(to: Recipient, profile_url: &str) -> Self {
        let text = format!(
            "Hi {},\n\nWelcome to TourHub! Complete your profile at {profile_url}.\n",
            to.first_name()
        );
        Self {
            to,
            subject: "Welcome to TourHub!".to_string(),
            text,
        }
    }

    /// Password reset instructions carrying a single-use link.
    pub fn password_reset(to: Recipient, reset_url: &str, ttl_minutes: u64) -> Self {
        let text = format!(
            "Hi {},\n\nForgot your password? Submit a PATCH request with your new password \
             and passwordConfirm to: {reset_url}\n\nThis link is valid for {ttl_minutes} minutes. \
             If you didn't forget your password, please ignore this email.\n",
            to.first_name()
        );
        Self {
            to,
            subject: format!("Your password reset token (valid for {ttl_minutes} min)"),
            text,
        }
    }
}

/// Mail transport.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message. Any transport failure is a `Delivery` error.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}
