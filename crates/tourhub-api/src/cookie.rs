//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};

use tourhub_core::config::AppConfig;

/// Cookie carrying a session token for the lifetime of the token.
///
/// `Secure` is only set in production so the cookie works over plain HTTP
/// during development.
pub fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.auth.cookie_name.clone(), token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.environment.is_production())
        .max_age(time::Duration::seconds(config.auth.jwt_ttl_seconds()))
        .build()
}

/// Expired, empty cookie that replaces the session cookie on logout.
pub fn cleared_cookie(config: &AppConfig) -> Cookie<'static> {
    Cookie::build((config.auth.cookie_name.clone(), String::new()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.environment.is_production())
        .max_age(time::Duration::ZERO)
        .build()
}
