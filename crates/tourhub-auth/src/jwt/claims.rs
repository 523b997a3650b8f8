//! JWT claims carried by every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};

/// Claims payload of a session token.
///
/// Subject and expiry are fixed at issuance; nothing the client sends
/// outside the signed payload is consulted during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal ID.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks whether this token has expired at `now` (seconds since epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Failure to issue or verify a session token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
    /// Bad signature, wrong algorithm, or unparsable structure.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The token could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => {
                AppError::unauthenticated("Your token has expired! Please log in again.")
            }
            TokenError::Malformed(_) => {
                AppError::unauthenticated("Invalid token. Please log in again!")
            }
            e @ TokenError::Signing(_) => {
                AppError::with_source(ErrorKind::Internal, "Failed to issue session token", e)
            }
        }
    }
}
