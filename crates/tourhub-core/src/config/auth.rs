//! Authentication configuration.

use serde::{Deserialize, Serialize};

const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Upper bound for `jwt_ttl_minutes` (ten years).
pub const MAX_JWT_TTL_MINUTES: u64 = 10 * 365 * 24 * 60;

/// Upper bound for `reset_token_ttl_minutes` (one day).
pub const MAX_RESET_TTL_MINUTES: u64 = 24 * 60;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in minutes. Also used as the cookie max-age.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Password-reset token TTL in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl AuthConfig {
    /// Whether the signing secret was left at its shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_SECRET || self.jwt_secret.is_empty()
    }

    /// Session token TTL in seconds, capped at [`MAX_JWT_TTL_MINUTES`].
    pub fn jwt_ttl_seconds(&self) -> i64 {
        capped_seconds(self.jwt_ttl_minutes, MAX_JWT_TTL_MINUTES)
    }

    /// Reset token TTL in seconds, capped at [`MAX_RESET_TTL_MINUTES`].
    pub fn reset_token_ttl_seconds(&self) -> i64 {
        capped_seconds(self.reset_token_ttl_minutes, MAX_RESET_TTL_MINUTES)
    }
}

fn capped_seconds(minutes: u64, max_minutes: u64) -> i64 {
    // Both caps fit comfortably in i64 seconds.
    (minutes.min(max_minutes) * 60) as i64
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_jwt_ttl(),
            cookie_name: default_cookie_name(),
            reset_token_ttl_minutes: default_reset_ttl(),
            password_min_length: default_password_min(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_SECRET.to_string()
}

fn default_jwt_ttl() -> u64 {
    90 * 24 * 60
}

fn default_cookie_name() -> String {
    "jwt".to_string()
}

fn default_reset_ttl() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}
