//! Reset token generation and hashing.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use tourhub_core::error::AppError;

/// Random bytes in a reset token.
const TOKEN_BYTES: usize = 32;

/// A freshly generated reset token.
///
/// The plain value leaves the process once, inside the reset link, and is
/// never stored or logged. Only [`ResetToken::digest`] is persisted.
pub struct ResetToken {
    plain: String,
    digest: String,
}

impl ResetToken {
    /// Generate a new random token.
    pub fn generate() -> Result<Self, AppError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::internal(format!("Failed to generate reset token: {e}")))?;
        let plain = hex::encode(bytes);
        let digest = digest(&plain);
        Ok(Self { plain, digest })
    }

    /// The value sent to the principal.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// The one-way hash kept in the store.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Give up the plain value.
    pub fn into_plain(self) -> String {
        self.plain
    }
}

impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetToken")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// SHA-256 hex digest of a plain reset token.
pub fn digest(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}
