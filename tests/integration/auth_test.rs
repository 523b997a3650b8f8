//! Signup, login, logout, and session resolution.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;

use tourhub_auth::JwtEncoder;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_returns_token_and_session_cookie() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/v1/users/signup",
            Some(json!({
                "name": "Ana Lima",
                "email": "Ana@Example.com",
                "password": PASSWORD,
                "passwordConfirm": PASSWORD,
                "role": "admin",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "success");
    assert!(response.body["token"].is_string());

    let user = &response.body["data"]["user"];
    assert_eq!(user["email"], "ana@example.com");
    assert_eq!(user["role"], "user");
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("active").is_none());

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age="));
    assert!(!cookie.contains("Secure"));

    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let app = TestApp::new();
    app.signup("dup@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/signup",
            Some(json!({
                "name": "Other",
                "email": "DUP@example.com",
                "password": PASSWORD,
                "passwordConfirm": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["status"], "fail");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = TestApp::new();

    let mismatch = app
        .request(
            "POST",
            "/api/v1/users/signup",
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": PASSWORD,
                "passwordConfirm": "different1",
            })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.body["message"], "Passwords are not the same!");

    let bad_email = app
        .request(
            "POST",
            "/api/v1/users/signup",
            Some(json!({
                "name": "Ana",
                "email": "not-an-email",
                "password": PASSWORD,
                "passwordConfirm": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let not_json = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/v1/users/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_resolves_same_principal() {
    let app = TestApp::new();
    let (_, id) = app.signup("ana@example.com").await;

    let login = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "ana@example.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let me = app
        .request("GET", "/api/v1/users/me", None, Some(&login.token()))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["user"]["id"], id.to_string());
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;

    let missing = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "ana@example.com"})),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "Please provide email and password!");

    let wrong = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "ana@example.com", "password": "wrong-pass"})),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({"email": "nobody@example.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Incorrect email or password");
    assert_eq!(wrong.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_cookie_transport() {
    let app = TestApp::new();
    let (token, _) = app.signup("ana@example.com").await;

    let me = app
        .send(
            Request::builder()
                .uri("/api/v1/users/me")
                .header(header::COOKIE, format!("jwt={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);

    // The header wins even when it carries a bad token.
    let both = app
        .send(
            Request::builder()
                .uri("/api/v1/users/me")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .header(header::COOKIE, format!("jwt={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(both.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protect_rejections() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.body["message"],
        "You are not logged in! Please log in to get access."
    );

    let garbage = app
        .request("GET", "/api/v1/users/me", None, Some("abc.def.ghi"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["message"], "Invalid token. Please log in again!");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let (_, id) = app.signup("ana@example.com").await;

    let long_ago = Utc::now() - Duration::minutes(app.config.auth.jwt_ttl_minutes as i64 + 5);
    let expired = JwtEncoder::new(&app.config.auth)
        .issue_at(id, long_ago)
        .unwrap()
        .token;

    let response = app
        .request("GET", "/api/v1/users/me", None, Some(&expired))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "Your token has expired! Please log in again."
    );
}

#[tokio::test]
async fn test_token_issued_before_password_change_is_rejected() {
    let app = TestApp::new();
    let (token, id) = app.signup("ana@example.com").await;

    let old = JwtEncoder::new(&app.config.auth)
        .issue_at(id, Utc::now() - Duration::hours(1))
        .unwrap()
        .token;
    assert_eq!(
        app.request("GET", "/api/v1/users/me", None, Some(&old))
            .await
            .status,
        StatusCode::OK
    );

    let changed = app
        .request(
            "PATCH",
            "/api/v1/users/updateMyPassword",
            Some(json!({
                "passwordCurrent": PASSWORD,
                "password": "newpass123",
                "passwordConfirm": "newpass123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let stale = app
        .request("GET", "/api/v1/users/me", None, Some(&old))
        .await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        stale.body["message"],
        "User recently changed password! Please log in again."
    );

    let fresh = app
        .request("GET", "/api/v1/users/me", None, Some(&changed.token()))
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_requires_current() {
    let app = TestApp::new();
    let (token, _) = app.signup("ana@example.com").await;

    let response = app
        .request(
            "PATCH",
            "/api/v1/users/updateMyPassword",
            Some(json!({
                "passwordCurrent": "wrong-pass",
                "password": "newpass123",
                "passwordConfirm": "newpass123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Your current password is wrong.");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/users/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    let cookie = response.set_cookie().expect("cleared cookie");
    assert!(cookie.starts_with("jwt=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Can't find /api/v1/nope on this server!");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
