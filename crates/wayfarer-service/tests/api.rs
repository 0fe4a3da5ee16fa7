//! End-to-end checks of the assembled router against the fixture map.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use wayfarer_service::{app, AppState, AppStateError};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal_map.json")
}

fn fixture_state() -> AppState {
    AppState::load(fixture_path()).expect("fixture map loads")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn plans_a_route_between_named_settlements() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/route")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"from":"eastwatch","to":"Saltmere"}"#))
        .expect("request");

    let response = app(fixture_state()).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(body["from"]["name"], "Eastwatch");
    assert_eq!(body["units"]["distance_unit"], "km");
    let best = &body["paths"][0];
    assert_eq!(best["cells"], serde_json::json!([9, 10]));
    assert!(best["time_hours"].as_f64().expect("time") > 0.0);
}

#[tokio::test]
async fn metrics_endpoint_answers_without_a_recorder() {
    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .expect("request");

    let response = app(fixture_state()).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let request = Request::builder()
        .uri("/api/v1/nowhere")
        .body(Body::empty())
        .expect("request");

    let response = app(fixture_state()).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn missing_map_file_is_reported() {
    let err = AppState::load("/definitely/not/here/map.json").unwrap_err();
    assert!(matches!(err, AppStateError::MapNotFound(_)));
    assert!(err.to_string().contains("map not found"));
}
