//! Simulated ultrasonic water-tank level sensor.
//!
//! A stand-in for real hardware during mobile-app development: one simulated
//! distance reading served over plain HTTP and JSON.
//!
//! ```text
//! sensor ──┐
//!          │ distance_mm
//!  ~~~~~~~~▼~~~~~~~~  water surface
//!          │ water_level_mm = tank_height_mm - distance_mm
//!  ────────┴────────  tank floor
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`tank`]: Tank geometry, conversions and the shared sensor state
//! - [`api`]: HTTP API for the sensor, health and metrics
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod tank;
pub mod utils;

pub use config::Config;
pub use error::{Result, SimError};
