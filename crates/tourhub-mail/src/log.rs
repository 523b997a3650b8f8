//! Mailer that only records the envelope in the log.

use async_trait::async_trait;
use tracing::info;

use tourhub_core::result::AppResult;
use tourhub_core::traits::{MailMessage, Mailer};

/// Logs recipient and subject of every message. The body may carry a
/// reset link, so it is never logged.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %message.to.email,
            subject = %message.subject,
            "Mail delivered to log"
        );
        Ok(())
    }
}
