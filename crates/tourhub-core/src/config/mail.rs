//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which mailer delivers account emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log the envelope only; nothing leaves the process.
    #[default]
    Log,
    /// POST each message as JSON to an HTTP mail relay.
    Http,
}

/// Mail delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mailer implementation.
    #[serde(default)]
    pub provider: MailProvider,
    /// Relay endpoint for the `http` provider.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token sent to the relay, if any.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Relay request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            endpoint: String::new(),
            api_key: None,
            from: default_from(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_from() -> String {
    "TourHub <no-reply@tourhub.local>".to_string()
}

fn default_timeout() -> u64 {
    10
}
