//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{health, height, index, metrics, random_distance, set_distance, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Sensor endpoints
        .route("/", get(index))
        .route("/height", get(height))
        .route("/set", post(set_distance))
        .route("/random", get(random_distance))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
