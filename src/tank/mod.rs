//! Simulated water-tank sensor.
//!
//! This module handles:
//! - Tank geometry and the distance-to-level conversion
//! - Permissive parsing of set-distance requests
//! - The shared sensor state and its operations

pub mod conversion;
pub mod input;
pub mod state;

pub use conversion::{
    round_tenth, Reading, TankGeometry, DEFAULT_DISTANCE_MM, MAX_WATER_LEVEL_MM, TANK_HEIGHT_MM,
};
pub use input::DistanceInput;
pub use state::{SensorSettings, SensorState, SetOutcome};
