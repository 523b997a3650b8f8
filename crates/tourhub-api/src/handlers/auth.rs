//! Auth handlers: signup, login, logout, password recovery and change.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use tourhub_auth::{AuthSession, SignupInput};

use crate::cookie::{cleared_cookie, session_cookie};
use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest,
    UpdatePasswordRequest,
};
use crate::dto::response::{ApiResponse, UserData};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, ValidJson};
use crate::state::AppState;

type SignedIn = (StatusCode, CookieJar, Json<ApiResponse<UserData>>);

/// Set the session cookie and return the token with the principal.
fn signed_in(state: &AppState, jar: CookieJar, session: AuthSession, status: StatusCode) -> SignedIn {
    let jar = jar.add(session_cookie(&state.config, session.token.clone()));
    let body = ApiResponse::with_token(UserData { user: session.user }, session.token);
    (status, jar, Json(body))
}

/// POST /api/v1/users/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<SignupRequest>,
) -> ApiResult<SignedIn> {
    let session = state
        .auth
        .signup(SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirm: req.password_confirm,
        })
        .await?;
    Ok(signed_in(&state, jar, session, StatusCode::CREATED))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<SignedIn> {
    let session = state.auth.login(&req.email, &req.password).await?;
    Ok(signed_in(&state, jar, session, StatusCode::OK))
}

/// GET /api/v1/users/logout
///
/// Replaces the session cookie. Tokens already handed out stay valid
/// until they expire.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    (jar.add(cleared_cookie(&state.config)), Json(ApiResponse::empty()))
}

/// POST /api/v1/users/forgotPassword
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ForgotPasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let reset_url_base = format!(
        "{}/api/v1/users/resetPassword",
        state.config.server.public_url.trim_end_matches('/')
    );
    state
        .auth
        .forgot_password(&req.email, &reset_url_base)
        .await?;
    Ok(Json(ApiResponse::message("Token sent to email!")))
}

/// PATCH /api/v1/users/resetPassword/{token}
pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(token): Path<String>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> ApiResult<SignedIn> {
    let session = state
        .auth
        .reset_password(&token, &req.password, &req.password_confirm)
        .await?;
    Ok(signed_in(&state, jar, session, StatusCode::OK))
}

/// PATCH /api/v1/users/updateMyPassword
pub async fn update_my_password(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    JsonBody(req): JsonBody<UpdatePasswordRequest>,
) -> ApiResult<SignedIn> {
    let session = state
        .auth
        .update_password(&auth, &req.password_current, &req.password, &req.password_confirm)
        .await?;
    Ok(signed_in(&state, jar, session, StatusCode::OK))
}
