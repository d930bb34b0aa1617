//! HTTP API tests, driven through the router without binding a port
//! (except for the mock upstream the lookup proxy talks to)

mod common;

use account_sentry::api::{create_router, handlers::AppState, REQUEST_ID_HEADER};
use account_sentry::{Checklist, RobloxUsersClient};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::MockUpstream;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(upstream_url: &str) -> Router {
    let users = RobloxUsersClient::with_endpoint(upstream_url).unwrap();
    let state = Arc::new(AppState::new(Checklist::builtin().unwrap(), users));
    create_router(state)
}

async fn send_raw(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = app("http://127.0.0.1:9/unused");
    let (status, body) = send(&app, "GET", "/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_checklist_lists_nine_unchecked_indicators() {
    let app = app("http://127.0.0.1:9/unused");
    let (status, body) = send(&app, "GET", "/v1/checklist", None).await;

    assert_eq!(status, StatusCode::OK);
    let indicators = body["data"]["indicators"].as_array().unwrap();
    assert_eq!(indicators.len(), 9);
    assert_eq!(indicators[0]["id"], "email_changed");
    assert_eq!(indicators[0]["points"], 30);
    assert!(indicators.iter().all(|i| i["checked"] == false));
    assert_eq!(body["data"]["max_score"], 100);
}

#[tokio::test]
async fn test_score_high_risk() {
    let app = app("http://127.0.0.1:9/unused");
    let (status, body) = send(
        &app,
        "POST",
        "/v1/score",
        Some(json!({"checked": ["email_changed", "password_changed", "unknown_logins"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["score"], 85);
    assert_eq!(data["level"], "High");
    assert_eq!(data["tone"], "bad");
    assert_eq!(data["matched"].as_array().unwrap().len(), 3);
    let advice = data["advice"].as_array().unwrap();
    assert_eq!(advice.len(), 5);
    assert!(advice[0].as_str().unwrap().starts_with("Secure your email account first"));
}

#[tokio::test]
async fn test_score_nothing_checked() {
    let app = app("http://127.0.0.1:9/unused");
    let (status, body) = send(&app, "POST", "/v1/score", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 0);
    assert_eq!(body["data"]["level"], "Low");
    assert_eq!(body["data"]["advice"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_score_rejects_unknown_indicator() {
    let app = app("http://127.0.0.1:9/unused");
    let (status, body) = send(
        &app,
        "POST",
        "/v1/score",
        Some(json!({"checked": ["email_changed", "made_up"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CHECKLIST_UNKNOWN_INDICATOR");
}

#[tokio::test]
async fn test_lookup_proxies_upstream_record() {
    let upstream = MockUpstream::ok(json!({"data": [{"id": 1, "name": "validname"}]})).await;
    let app = app(&upstream.url);

    let (status, body) = send(&app, "POST", "/v1/lookup", Some(json!({"username": "validname"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"], json!({"id": 1, "name": "validname"}));
    assert_eq!(upstream.hits(), 1);

    let (_, stats) = send(&app, "GET", "/v1/stats", None).await;
    assert_eq!(stats["data"]["lookups_found"], 1);
}

#[tokio::test]
async fn test_lookup_validation_is_bad_request() {
    let upstream = MockUpstream::ok(json!({"data": []})).await;
    let app = app(&upstream.url);

    let (status, body) = send(&app, "POST", "/v1/lookup", Some(json!({"username": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_EMPTY_USERNAME");
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_lookup_not_found_and_upstream_errors() {
    let empty = MockUpstream::ok(json!({"data": []})).await;
    let (status, body) = send(
        &app(&empty.url),
        "POST",
        "/v1/lookup",
        Some(json!({"username": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "LOOKUP_NOT_FOUND");

    let limited = MockUpstream::start(StatusCode::TOO_MANY_REQUESTS, "{}").await;
    let (status, body) = send(
        &app(&limited.url),
        "POST",
        "/v1/lookup",
        Some(json!({"username": "validname"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"]["message"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn test_malformed_body_gets_json_error() {
    let upstream = MockUpstream::ok(json!({"data": [{"id": 1}]})).await;
    let app = app(&upstream.url);

    for uri in ["/v1/score", "/v1/lookup"] {
        let (status, body) = send_raw(&app, uri, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
        assert!(body["error"]["details"].is_string());
    }

    // Wrong field type is rejected the same way
    let (status, body) = send_raw(&app, "/v1/score", r#"{"checked": "email_changed"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app("http://127.0.0.1:9/unused");
    let request = Request::builder()
        .uri("/v1/checklist")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_repeated_requests_are_not_throttled() {
    let app = app("http://127.0.0.1:9/unused");

    for _ in 0..100 {
        let (status, _) = send(&app, "GET", "/v1/checklist", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
