//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use telemetry_core::schema::EventSchema;
use telemetry_core::validator::EventValidator;
use telemetry_store::PgTelemetryWriter;
use tower::ServiceExt;

use telemetry_api::state::AppState;

/// Body limit used by integration tests.
const TEST_MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full app router with a real `PgTelemetryWriter`. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let validator = Arc::new(EventValidator::new(Arc::new(EventSchema::standard())));
    let writer = Arc::new(PgTelemetryWriter::new(pool));
    telemetry_api::app(AppState::new(validator, writer, TEST_MAX_BODY_BYTES))
}

/// Count the rows currently in `telemetry_data`.
pub async fn row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM telemetry_data")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Send a request with a raw body and return the status and text body.
pub async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a POST request with a JSON body and return the status and text body.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, String) {
    send(
        app,
        "POST",
        uri,
        Body::from(serde_json::to_vec(body).unwrap()),
    )
    .await
}

/// Send a GET request and return the response parsed as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, text) = send(app, "GET", uri, Body::empty()).await;
    (status, serde_json::from_str(&text).unwrap())
}
