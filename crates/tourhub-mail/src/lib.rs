//! # tourhub-mail
//!
//! Mailer implementations for account emails.
//!
//! - `log`: writes the envelope to the log and delivers nothing
//! - `http`: posts each message to a JSON mail relay

pub mod http;
pub mod log;

use std::sync::Arc;

use tourhub_core::config::{MailConfig, MailProvider};
use tourhub_core::result::AppResult;
use tourhub_core::traits::Mailer;

pub use self::http::HttpMailer;
pub use self::log::LogMailer;

/// Build the mailer selected by `config.provider`.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.provider {
        MailProvider::Log => Ok(Arc::new(LogMailer::new(&config.from))),
        MailProvider::Http => Ok(Arc::new(HttpMailer::new(config)?)),
    }
}
