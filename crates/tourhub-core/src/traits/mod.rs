//! Core traits defined in `tourhub-core` and implemented by other crates.

pub mod collection;
pub mod mailer;
pub mod repository;

pub use collection::Collection;
pub use mailer::{MailMessage, Mailer, Recipient};
pub use repository::Repository;
