//! Mailer backed by an HTTP mail relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use tourhub_core::config::MailConfig;
use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_core::traits::{MailMessage, Mailer, Recipient};

const USER_AGENT: &str = concat!("tourhub/", env!("CARGO_PKG_VERSION"));

/// Relay request body.
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a Recipient,
    subject: &'a str,
    text: &'a str,
}

/// Posts messages as JSON to `endpoint`, authenticating with a bearer key
/// when one is configured.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::configuration(
                "mail.endpoint is required for the http mail provider",
            ));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build mail client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(to = %message.to.email, error = %e, "Mail relay unreachable");
            AppError::with_source(ErrorKind::Delivery, "Mail relay unreachable", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(to = %message.to.email, %status, "Mail relay rejected message");
            return Err(AppError::delivery(format!(
                "Mail relay rejected message: {status}"
            )));
        }

        debug!(to = %message.to.email, subject = %message.subject, "Mail relayed");
        Ok(())
    }
}
