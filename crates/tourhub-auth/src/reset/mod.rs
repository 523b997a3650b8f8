//! One-time password reset tokens.

pub mod token;
pub mod vault;

pub use token::{ResetToken, digest};
pub use vault::ResetTokenVault;
