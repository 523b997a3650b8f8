//! Tour listing through the query builder, plus CRUD.

use axum::http::StatusCode;
use serde_json::{Value, json};

use tourhub_entity::user::UserRole;

use crate::helpers::TestApp;

fn names(body: &Value) -> Vec<String> {
    body["data"]["tours"]
        .as_array()
        .expect("tour list")
        .iter()
        .map(|t| t["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

async fn seeded() -> TestApp {
    let app = TestApp::new();
    app.insert_tour("Forest Hiker", 397.0, 4.7, false).await;
    app.insert_tour("Sea Explorer", 497.0, 4.8, false).await;
    app.insert_tour("Snow Adventurer", 997.0, 4.5, false).await;
    app.insert_tour("Secret Valley", 99.0, 5.0, true).await;
    app
}

#[tokio::test]
async fn test_secret_tours_are_hidden() {
    let app = seeded().await;

    let listed = app.request("GET", "/api/v1/tours", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["results"], 3);
    assert!(!names(&listed.body).contains(&"Secret Valley".to_string()));

    // Asking for secret tours explicitly still cannot reveal them.
    let asked = app
        .request("GET", "/api/v1/tours?secretTour=true", None, None)
        .await;
    assert_eq!(asked.body["results"], 0);

    let hidden = app.insert_tour("Hidden Canyon", 150.0, 4.0, true).await;
    let by_id = app
        .request("GET", &format!("/api/v1/tours/{}", hidden.id), None, None)
        .await;
    assert_eq!(by_id.status, StatusCode::NOT_FOUND);
    assert_eq!(by_id.body["message"], "No tour found with that ID");
}

#[tokio::test]
async fn test_filter_sort_and_fields() {
    let app = seeded().await;

    let response = app
        .request(
            "GET",
            "/api/v1/tours?price%5Blt%5D=900&sort=-price&fields=name,price",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Sea Explorer", "Forest Hiker"]);

    let first = response.body["data"]["tours"][0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "name", "price"]);

    let value_operator = app
        .request("GET", "/api/v1/tours?ratingsAverage=gte:4.7&sort=name", None, None)
        .await;
    assert_eq!(
        names(&value_operator.body),
        vec!["Forest Hiker", "Sea Explorer"]
    );
}

#[tokio::test]
async fn test_default_projection_hides_revision() {
    let app = seeded().await;
    let response = app.request("GET", "/api/v1/tours", None, None).await;
    let first = &response.body["data"]["tours"][0];
    assert!(first.get("name").is_some());
    assert!(first.get("revision").is_none());
}

#[tokio::test]
async fn test_paging() {
    let app = seeded().await;
    let response = app
        .request("GET", "/api/v1/tours?sort=price&limit=2&page=2", None, None)
        .await;
    assert_eq!(names(&response.body), vec!["Snow Adventurer"]);
}

#[tokio::test]
async fn test_operator_injection_is_ignored() {
    let app = seeded().await;
    let response = app
        .request(
            "GET",
            "/api/v1/tours?price%5B%24where%5D=sleep(1000)&%24where=1&price%5Bne%5D=0",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["results"], 3);
}

#[tokio::test]
async fn test_uncastable_filter_value() {
    let app = seeded().await;
    let response = app
        .request("GET", "/api/v1/tours?price=abc", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], "fail");
}

#[tokio::test]
async fn test_top_cheap_alias() {
    let app = TestApp::new();
    for (i, rating) in [4.1, 4.9, 4.3, 4.9, 3.8, 4.6, 4.0].iter().enumerate() {
        app.insert_tour(&format!("Tour number {i}"), 100.0 + i as f64, *rating, false)
            .await;
    }

    let response = app
        .request("GET", "/api/v1/tours/top-5-cheap?limit=50&sort=name", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["results"], 5);

    let tours = response.body["data"]["tours"].as_array().unwrap();
    assert_eq!(tours[0]["name"], "Tour number 1");
    assert_eq!(tours[1]["name"], "Tour number 3");
    assert_eq!(tours[2]["name"], "Tour number 5");

    let allowed = ["id", "name", "price", "ratingsAverage", "summary", "difficulty"];
    for tour in tours {
        for key in tour.as_object().unwrap().keys() {
            assert!(allowed.contains(&key.as_str()), "unexpected field {key}");
        }
    }
}

#[tokio::test]
async fn test_invalid_id() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/tours/nope", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid id: nope.");
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = TestApp::new();
    let admin = app.signup_as("admin@example.com", UserRole::Admin).await;
    let tour = app.insert_tour("Forest Hiker", 397.0, 4.7, false).await;
    let path = format!("/api/v1/tours/{}", tour.id);

    let updated = app
        .request(
            "PATCH",
            &path,
            Some(json!({"price": 450, "name": "Forest Wanderer"})),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["tour"]["price"], 450.0);
    assert_eq!(updated.body["data"]["tour"]["slug"], "forest-wanderer");
    assert_eq!(updated.body["data"]["tour"]["revision"], 1);

    let invalid = app
        .request("PATCH", &path, Some(json!({"priceDiscount": 9999})), Some(&admin))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
