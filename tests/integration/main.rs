//! Integration tests for the tank simulator HTTP API.
//!
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use tank_sim::api::{create_router, AppState};
use tank_sim::tank::{round_tenth, Reading, SensorSettings, SensorState};

/// Router plus a handle on its state for direct inspection.
fn test_app() -> (Router, AppState) {
    let state = AppState::new(SensorState::seeded(SensorSettings::default(), 42));
    (create_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_set(app: &Router, content_type: Option<&str>, body: &'static str) -> Reading {
    let mut builder = Request::builder().method(Method::POST).uri("/set");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let (status, body) = send(app, builder.body(Body::from(body)).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

async fn get_reading(app: &Router, uri: &str) -> Reading {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn readings_use_snake_case_keys() {
    let (app, _) = test_app();
    let (_, body) = get(&app, "/random").await;

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["distance_mm", "percent", "water_level_mm"]);
}

#[tokio::test]
async fn set_then_page_reflects_new_distance() {
    let (app, _) = test_app();

    let reading = post_set(&app, Some("application/json"), r#"{"distance_mm": 500}"#).await;
    assert_eq!(reading.distance_mm, 500.0);
    assert_eq!(reading.water_level_mm, 700.0);
    assert_eq!(round_tenth(reading.percent), 73.7);

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("distance_mm: 500.0"));
    assert!(html.contains("water_level_mm: 700.0"));
    assert!(html.contains("percent: 73.7"));
}

#[tokio::test]
async fn out_of_range_set_is_ignored() {
    let (app, state) = test_app();
    post_set(&app, Some("application/json"), r#"{"distance_mm": 321.5}"#).await;

    let low = post_set(&app, Some("application/json"), r#"{"distance_mm": -5}"#).await;
    let high = post_set(&app, Some("application/json"), r#"{"distance_mm": 1500}"#).await;

    assert_eq!(low.distance_mm, 321.5);
    assert_eq!(high.distance_mm, 321.5);
    assert_eq!(state.sensor.current().distance_mm, 321.5);
}

#[tokio::test]
async fn malformed_set_bodies_keep_current_value() {
    let (app, state) = test_app();
    let before = state.sensor.current();

    for body in ["", "{", "{}", r#"{"distance_mm": "deep"}"#, r#"{"distance_mm": [1]}"#] {
        let reading = post_set(&app, Some("application/json"), body).await;
        assert_eq!(reading, before, "body: {body:?}");
    }
}

#[tokio::test]
async fn set_ignores_content_type() {
    let (app, _) = test_app();

    let plain = post_set(&app, Some("text/plain"), r#"{"distance_mm": 610}"#).await;
    assert_eq!(plain.distance_mm, 610.0);

    let missing = post_set(&app, None, r#"{"distance_mm": "620"}"#).await;
    assert_eq!(missing.distance_mm, 620.0);
}

#[tokio::test]
async fn random_stays_in_range() {
    let (app, _) = test_app();

    for _ in 0..200 {
        let reading = get_reading(&app, "/random").await;
        assert!((200.0..=400.0).contains(&reading.distance_mm));
        assert_eq!(round_tenth(reading.distance_mm), reading.distance_mm);
        assert_eq!(reading.water_level_mm, 1200.0 - reading.distance_mm);
    }
}

#[tokio::test]
async fn height_jitters_and_stays_clamped() {
    let (app, _) = test_app();
    post_set(&app, None, r#"{"distance_mm": 0}"#).await;

    let mut previous = 0.0;
    for _ in 0..200 {
        let reading = get_reading(&app, "/height").await;
        assert!((0.0..=1200.0).contains(&reading.distance_mm));
        assert!((reading.distance_mm - previous).abs() <= 1.0);
        assert!(reading.percent <= 100.0);
        previous = reading.distance_mm;
    }
}

#[tokio::test]
async fn page_is_idempotent() {
    let (app, state) = test_app();
    let before = state.sensor.current();

    let (_, first) = get(&app, "/").await;
    let (_, second) = get(&app, "/").await;

    assert_eq!(first, second);
    assert_eq!(state.sensor.current(), before);
}

#[tokio::test]
async fn default_page_shows_full_tank() {
    let (app, _) = test_app();
    let (_, html) = get(&app, "/").await;

    assert!(html.contains("distance_mm: 250.0"));
    assert!(html.contains("water_level_mm: 950.0"));
    assert!(html.contains("percent: 100.0"));
}

#[tokio::test]
async fn empty_tank_boundary() {
    let (app, _) = test_app();
    let reading = post_set(&app, None, r#"{"distance_mm": 1200}"#).await;

    assert_eq!(reading.water_level_mm, 0.0);
    assert_eq!(reading.percent, 0.0);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _) = test_app();
    let (status, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_allow_cross_origin_callers() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/height")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
