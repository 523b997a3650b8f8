//! Role restrictions layered behind protect.

use axum::http::StatusCode;
use serde_json::json;

use tourhub_entity::user::UserRole;

use crate::helpers::TestApp;

fn new_tour() -> serde_json::Value {
    json!({
        "name": "The Forest Hiker",
        "duration": 5,
        "maxGroupSize": 25,
        "difficulty": "easy",
        "price": 397,
        "summary": "Breathtaking hike through the Canadian Banff National Park",
    })
}

#[tokio::test]
async fn test_user_admin_requires_admin_role() {
    let app = TestApp::new();
    let (user, _) = app.signup("user@example.com").await;
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;

    let anonymous = app.request("GET", "/api/v1/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let denied = app.request("GET", "/api/v1/users", None, Some(&user)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["status"], "fail");

    let allowed = app.request("GET", "/api/v1/users", None, Some(&admin)).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["results"], 2);
}

#[tokio::test]
async fn test_tour_writes_require_staff() {
    let app = TestApp::new();
    let (user, _) = app.signup("user@example.com").await;
    let guide = app.signup_as("guide@example.com", UserRole::Guide).await;
    let lead = app.signup_as("lead@example.com", UserRole::LeadGuide).await;

    let anonymous = app
        .request("POST", "/api/v1/tours", Some(new_tour()), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    for token in [&user, &guide] {
        let denied = app
            .request("POST", "/api/v1/tours", Some(new_tour()), Some(token))
            .await;
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
    }

    let created = app
        .request("POST", "/api/v1/tours", Some(new_tour()), Some(&lead))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["tour"]["slug"], "the-forest-hiker");
    assert_eq!(created.body["data"]["tour"]["ratingsAverage"], 4.5);

    // Reads on the same path stay public.
    let listed = app.request("GET", "/api/v1/tours", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["results"], 1);
}

#[tokio::test]
async fn test_role_change_applies_to_existing_token() {
    let app = TestApp::new();
    let (token, id) = app.signup("user@example.com").await;
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;

    assert_eq!(
        app.request("GET", "/api/v1/users", None, Some(&token))
            .await
            .status,
        StatusCode::FORBIDDEN
    );

    let promoted = app
        .request(
            "PATCH",
            &format!("/api/v1/users/{id}"),
            Some(json!({"role": "admin"})),
            Some(&admin),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["data"]["user"]["role"], "admin");

    assert_eq!(
        app.request("GET", "/api/v1/users", None, Some(&token))
            .await
            .status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_duplicate_tour_name_conflicts() {
    let app = TestApp::new();
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;

    let first = app
        .request("POST", "/api/v1/tours", Some(new_tour()), Some(&admin))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/v1/tours", Some(new_tour()), Some(&admin))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}
