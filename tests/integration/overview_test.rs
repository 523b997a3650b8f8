//! Soft identification on the overview route.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_anonymous_overview() {
    let app = TestApp::new();
    app.insert_tour("Forest Hiker", 397.0, 4.7, false).await;
    app.insert_tour("Secret Valley", 99.0, 5.0, true).await;

    let response = app.request("GET", "/overview", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["user"].is_null());
    assert_eq!(response.body["data"]["tours"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overview_with_session_cookie() {
    let app = TestApp::new();
    let (token, id) = app.signup("ana@example.com").await;

    let response = app
        .send(
            Request::builder()
                .uri("/overview")
                .header(header::COOKIE, format!("jwt={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["id"], id.to_string());
}

#[tokio::test]
async fn test_bad_token_is_anonymous() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/overview", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["user"].is_null());
}

#[tokio::test]
async fn test_deactivated_principal_is_anonymous() {
    let app = TestApp::new();
    let (token, _) = app.signup("ana@example.com").await;
    let deleted = app
        .request("DELETE", "/api/v1/users/deleteMe", None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/overview", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["user"].is_null());
}
