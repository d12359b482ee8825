//! Unified error types for the tank simulator.

use thiserror::Error;

/// Unified error type for the tank simulator.
#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Metrics exporter could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tank height must be a positive, finite number.
    #[error("TANK_HEIGHT_MM must be positive, got {0}")]
    TankHeight(f64),

    /// Max water level must be a positive, finite number.
    #[error("MAX_WATER_LEVEL_MM must be positive, got {0}")]
    MaxWaterLevel(f64),

    /// Initial distance lies outside the tank.
    #[error("INITIAL_DISTANCE_MM must be within [0, {tank_height_mm}], got {distance_mm}")]
    InitialDistance {
        /// Rejected distance.
        distance_mm: f64,
        /// Configured tank height.
        tank_height_mm: f64,
    },

    /// Jitter amplitude must be finite and non-negative.
    #[error("JITTER_MM must be non-negative, got {0}")]
    Jitter(f64),

    /// Randomize bounds are inverted or outside the tank.
    #[error("RANDOM_MIN_MM..RANDOM_MAX_MM must lie within [0, {tank_height_mm}] with min <= max, got {min_mm}..{max_mm}")]
    RandomRange {
        /// Configured lower bound.
        min_mm: f64,
        /// Configured upper bound.
        max_mm: f64,
        /// Configured tank height.
        tank_height_mm: f64,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SimError>;
