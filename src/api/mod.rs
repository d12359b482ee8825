//! HTTP API module for the sensor, health and metrics endpoints.

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
