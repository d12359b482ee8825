//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use super::page;
use crate::metrics::LatencyTimer;
use crate::tank::{DistanceInput, Reading, SensorState};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The simulated sensor.
    pub sensor: Arc<SensorState>,
    /// Prometheus exporter handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a sensor.
    pub fn new(sensor: SensorState) -> Self {
        Self {
            sensor: Arc::new(sensor),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SensorState::default())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sensor", &self.sensor)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Dashboard page with the current reading. Never mutates state.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let _timer = LatencyTimer::new("/");
    Html(page::render(&state.sensor.current()))
}

/// Take a jittered measurement.
pub async fn height(State(state): State<AppState>) -> Json<Reading> {
    let _timer = LatencyTimer::new("/height");
    Json(state.sensor.measure())
}

/// Set the distance from a JSON body.
///
/// Never fails: unusable or out-of-range input returns the current reading.
pub async fn set_distance(State(state): State<AppState>, body: Bytes) -> Json<Reading> {
    let _timer = LatencyTimer::new("/set");
    let input = DistanceInput::from_body(&body);
    Json(state.sensor.set_distance(input))
}

/// Jump to a random distance.
pub async fn random_distance(State(state): State<AppState>) -> Json<Reading> {
    let _timer = LatencyTimer::new("/random");
    Json(state.sensor.randomize())
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition, or 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}
