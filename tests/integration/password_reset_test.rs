//! Forgot-password and reset-token redemption.

use axum::http::StatusCode;
use serde_json::json;

use tourhub_database::UserStore;

use crate::helpers::{PASSWORD, TestApp, test_config};

async fn forgot(app: &TestApp, email: &str) -> crate::helpers::TestResponse {
    app.request(
        "POST",
        "/api/v1/users/forgotPassword",
        Some(json!({"email": email})),
        None,
    )
    .await
}

async fn reset(app: &TestApp, token: &str, password: &str) -> crate::helpers::TestResponse {
    app.request(
        "PATCH",
        &format!("/api/v1/users/resetPassword/{token}"),
        Some(json!({"password": password, "passwordConfirm": password})),
        None,
    )
    .await
}

#[tokio::test]
async fn test_unknown_email() {
    let app = TestApp::new();
    let response = forgot(&app, "nobody@example.com").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        "There is no user with that email address."
    );
}

#[tokio::test]
async fn test_reset_round_trip() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;

    let sent = forgot(&app, "ana@example.com").await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.body["message"], "Token sent to email!");

    let tokens = app.reset_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].len(), 64);

    // Only the digest is stored.
    let stored = app
        .users
        .find_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_reset_token.as_deref(), Some(tokens[0].as_str()));

    let redeemed = reset(&app, &tokens[0], "brand-new-pass").await;
    assert_eq!(redeemed.status, StatusCode::OK);
    let token = redeemed.token();
    assert_eq!(
        app.request("GET", "/api/v1/users/me", None, Some(&token))
            .await
            .status,
        StatusCode::OK
    );

    let reused = reset(&app, &tokens[0], "another-pass").await;
    assert_eq!(reused.status, StatusCode::BAD_REQUEST);
    assert_eq!(reused.body["message"], "Token is invalid or has expired");

    let old_login = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "ana@example.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(old_login.status, StatusCode::UNAUTHORIZED);

    let new_login = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "ana@example.com", "password": "brand-new-pass"})),
            None,
        )
        .await;
    assert_eq!(new_login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delivery_failure_clears_token() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;
    app.mailer.fail_deliveries();

    let response = forgot(&app, "ana@example.com").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["status"], "error");
    assert_eq!(
        response.body["message"],
        "There was an error sending the email. Try again later!"
    );

    let stored = app
        .users
        .find_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_reset_token.is_none());
    assert!(stored.password_reset_expires.is_none());
}

#[tokio::test]
async fn test_expired_token() {
    let mut config = test_config();
    config.auth.reset_token_ttl_minutes = 0;
    let app = TestApp::with_config(config);
    app.signup("ana@example.com").await;

    assert_eq!(forgot(&app, "ana@example.com").await.status, StatusCode::OK);
    let token = app.reset_tokens().remove(0);

    let response = reset(&app, &token, "brand-new-pass").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Token is invalid or has expired");
}

#[tokio::test]
async fn test_new_password_is_validated_first() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;
    forgot(&app, "ana@example.com").await;
    let token = app.reset_tokens().remove(0);

    let short = reset(&app, &token, "short").await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    // The token survives a rejected password.
    let redeemed = reset(&app, &token, "long-enough-pass").await;
    assert_eq!(redeemed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::new();
    let response = reset(&app, "deadbeef", "brand-new-pass").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
