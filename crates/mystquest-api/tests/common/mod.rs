//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mystquest_core::clock::Clock;
use mystquest_core::token::RandomTokenIssuer;
use mystquest_test_support::{FixedClock, InMemoryCatalog, InMemorySessionStore};
use tower::ServiceExt;

use mystquest_api::notify::ChannelNotifier;
use mystquest_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over in-memory repositories and a fixed clock.
/// Uses the same route structure as `main.rs`. The router is `Clone`;
/// cloning keeps the shared state, so one app serves a whole scenario.
pub fn build_test_app() -> Router {
    let app_state = AppState::new(
        Arc::new(InMemoryCatalog::new()),
        Arc::new(InMemorySessionStore::new()),
        fixed_clock(),
        Arc::new(RandomTokenIssuer),
        Arc::new(ChannelNotifier::new()),
    );
    mystquest_api::app_router().with_state(app_state)
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(body)).await
}

/// Send a bodyless PUT request and return the response.
pub async fn put_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, None).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a DELETE request and return the status code.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    send(app, "DELETE", uri, None).await.0
}

/// Create a quest through the API and return its id as a string.
pub async fn create_quest(app: &Router, title: &str, number_of_rounds: i32) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/quests",
        &serde_json::json!({
            "title": title,
            "description": "integration test quest",
            "number_of_rounds": number_of_rounds,
            "created_by": uuid::Uuid::new_v4(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_owned()
}

/// Add `number_of_rounds` rounds to a quest through the API, returning the
/// round ids in order.
pub async fn add_rounds(app: &Router, quest_id: &str, number_of_rounds: i32) -> Vec<String> {
    let mut round_ids = Vec::new();
    for number in 1..=number_of_rounds {
        let (status, json) = post_json(
            app.clone(),
            &format!("/api/v1/quests/{quest_id}/rounds"),
            &serde_json::json!({
                "number": number,
                "title": format!("Round {number}"),
                "description": format!("Narration for round {number}"),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        round_ids.push(json["id"].as_str().unwrap().to_owned());
    }
    round_ids
}
