//! Reviews: protected reads, role gated writes, nested tour routes.

use axum::http::StatusCode;
use serde_json::json;

use tourhub_core::traits::Repository;
use tourhub_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_reviews_require_login() {
    let app = TestApp::new();
    let tour = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;

    let response = app.request("GET", "/api/v1/reviews", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let nested = format!("/api/v1/tours/{}/reviews", tour.id);
    let response = app.request("GET", &nested, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_users_write_reviews() {
    let app = TestApp::new();
    let tour = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let guide = app.signup_as("guide@example.com", UserRole::Guide).await;
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;
    let (user, user_id) = app.signup("user@example.com").await;

    let body = json!({ "review": "Amazing trip", "rating": 5, "tour": tour.id });
    for token in [&guide, &admin] {
        let denied = app
            .request("POST", "/api/v1/reviews", Some(body.clone()), Some(token))
            .await;
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
    }

    let created = app
        .request("POST", "/api/v1/reviews", Some(body), Some(&user))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let review = &created.body["data"]["review"];
    assert_eq!(review["user"], user_id.to_string());
    assert_eq!(review["tour"], tour.id.to_string());
    assert_eq!(review["rating"], 5.0);

    let listed = app.request("GET", "/api/v1/reviews", None, Some(&guide)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["results"], 1);
}

#[tokio::test]
async fn test_author_is_taken_from_session() {
    let app = TestApp::new();
    let tour = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let (_, victim) = app.signup("victim@example.com").await;
    let (user, user_id) = app.signup("user@example.com").await;

    let created = app
        .request(
            "POST",
            "/api/v1/reviews",
            Some(json!({ "review": "Nice", "tour": tour.id, "user": victim })),
            Some(&user),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["review"]["user"], user_id.to_string());
}

#[tokio::test]
async fn test_nested_routes_scope_to_tour() {
    let app = TestApp::new();
    let sea = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let forest = app.insert_tour("The Forest Hiker", 397.0, 4.7, false).await;
    let (ana, _) = app.signup("ana@example.com").await;
    let (bruno, _) = app.signup("bruno@example.com").await;

    let sea_path = format!("/api/v1/tours/{}/reviews", sea.id);
    let forest_path = format!("/api/v1/tours/{}/reviews", forest.id);
    for (path, token, text, rating) in [
        (&sea_path, &ana, "Loved the boat", 5),
        (&sea_path, &bruno, "Too windy", 2),
        (&forest_path, &ana, "Quiet and green", 4),
    ] {
        let created = app
            .request("POST", path, Some(json!({ "review": text, "rating": rating })), Some(token))
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    }

    let response = app
        .request("GET", &format!("{sea_path}?sort=rating&fields=review"), None, Some(&ana))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["results"], 2);
    let reviews = response.body["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews[0]["review"], "Too windy");
    assert_eq!(reviews[1]["review"], "Loved the boat");
    assert!(reviews[0].get("rating").is_none());

    let all = app.request("GET", "/api/v1/reviews", None, Some(&ana)).await;
    assert_eq!(all.body["results"], 3);

    let filtered = app
        .request("GET", "/api/v1/reviews?rating%5Bgte%5D=4", None, Some(&ana))
        .await;
    assert_eq!(filtered.body["results"], 2);
}

#[tokio::test]
async fn test_path_tour_wins_over_body() {
    let app = TestApp::new();
    let sea = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let forest = app.insert_tour("The Forest Hiker", 397.0, 4.7, false).await;
    let (user, _) = app.signup("user@example.com").await;

    let created = app
        .request(
            "POST",
            &format!("/api/v1/tours/{}/reviews", sea.id),
            Some(json!({ "review": "Great", "tour": forest.id })),
            Some(&user),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["review"]["tour"], sea.id.to_string());
}

#[tokio::test]
async fn test_create_rejections() {
    let app = TestApp::new();
    let tour = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let (user, _) = app.signup("user@example.com").await;

    let no_tour = app
        .request("POST", "/api/v1/reviews", Some(json!({ "review": "Hm" })), Some(&user))
        .await;
    assert_eq!(no_tour.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            &format!("/api/v1/tours/{}/reviews", uuid::Uuid::new_v4()),
            Some(json!({ "review": "Hm" })),
            Some(&user),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let path = format!("/api/v1/tours/{}/reviews", tour.id);
    let out_of_range = app
        .request("POST", &path, Some(json!({ "review": "Hm", "rating": 6 })), Some(&user))
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let first = app
        .request("POST", &path, Some(json!({ "review": "Good" })), Some(&user))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    let again = app
        .request("POST", &path, Some(json!({ "review": "Still good" })), Some(&user))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let bad_id = app
        .request("GET", "/api/v1/tours/nope/reviews", None, Some(&user))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_author_or_admin_edits() {
    let app = TestApp::new();
    let tour = app.insert_tour("The Sea Explorer", 497.0, 4.8, false).await;
    let (author, _) = app.signup("author@example.com").await;
    let (other, _) = app.signup("other@example.com").await;
    let guide = app.signup_as("guide@example.com", UserRole::Guide).await;
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;

    let created = app
        .request(
            "POST",
            &format!("/api/v1/tours/{}/reviews", tour.id),
            Some(json!({ "review": "Good", "rating": 4 })),
            Some(&author),
        )
        .await;
    let id = created.body["data"]["review"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/reviews/{id}");

    let patch = json!({ "rating": 3 });
    let not_owner = app.request("PATCH", &path, Some(patch.clone()), Some(&other)).await;
    assert_eq!(not_owner.status, StatusCode::FORBIDDEN);
    let wrong_role = app.request("PATCH", &path, Some(patch.clone()), Some(&guide)).await;
    assert_eq!(wrong_role.status, StatusCode::FORBIDDEN);

    let updated = app.request("PATCH", &path, Some(patch), Some(&author)).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["review"]["rating"], 3.0);
    assert_eq!(updated.body["data"]["review"]["review"], "Good");

    let fetched = app.request("GET", &path, None, Some(&guide)).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let review_id = uuid::Uuid::parse_str(&id).unwrap();
    assert!(app.reviews.find_by_id(&review_id).await.unwrap().is_none());

    let gone = app.request("GET", &path, None, Some(&author)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
