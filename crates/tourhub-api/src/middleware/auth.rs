//! Authentication middleware stages.
//!
//! `protect` rejects requests without a live principal, `is_logged_in`
//! attaches one when it can and never rejects.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiResult;
use crate::extractors::{CurrentUser, session_token};
use crate::state::AppState;

/// Resolve the session token to a principal or reject with 401.
pub async fn protect(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = session_token(request.headers(), &state.config.auth.cookie_name);
    let user = state.guard.authenticate(token.as_deref()).await?;
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Attach the principal if the token resolves; otherwise continue anonymously.
pub async fn is_logged_in(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers(), &state.config.auth.cookie_name);
    if let Some(user) = state.guard.identify(token.as_deref()).await {
        request.extensions_mut().insert(CurrentUser(user));
    }
    next.run(request).await
}
