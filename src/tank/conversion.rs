//! Tank geometry and the distance-to-level conversion.

use serde::{Deserialize, Serialize};

/// Total tank height in millimetres.
pub const TANK_HEIGHT_MM: f64 = 1200.0;

/// Water level at which the tank is reported as 100% full.
pub const MAX_WATER_LEVEL_MM: f64 = 950.0;

/// Distance the sensor reports right after startup.
pub const DEFAULT_DISTANCE_MM: f64 = 250.0;

/// Physical dimensions of the simulated tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankGeometry {
    /// Distance from the sensor to the tank floor.
    pub tank_height_mm: f64,
    /// Water level treated as a full tank.
    pub max_water_level_mm: f64,
}

impl Default for TankGeometry {
    fn default() -> Self {
        Self {
            tank_height_mm: TANK_HEIGHT_MM,
            max_water_level_mm: MAX_WATER_LEVEL_MM,
        }
    }
}

impl TankGeometry {
    /// Create a geometry from explicit dimensions.
    pub fn new(tank_height_mm: f64, max_water_level_mm: f64) -> Self {
        Self {
            tank_height_mm,
            max_water_level_mm,
        }
    }

    /// Clamp a distance into `[0, tank_height_mm]`.
    pub fn clamp_distance(&self, distance_mm: f64) -> f64 {
        distance_mm.clamp(0.0, self.tank_height_mm)
    }

    /// Whether a distance can be stored as-is.
    ///
    /// NaN is never in range.
    pub fn contains(&self, distance_mm: f64) -> bool {
        (0.0..=self.tank_height_mm).contains(&distance_mm)
    }

    /// Convert a sensor distance into a full reading.
    ///
    /// Percent is capped at 100 but has no floor: a negative water level
    /// yields a negative percent.
    pub fn reading(&self, distance_mm: f64) -> Reading {
        let water_level_mm = self.tank_height_mm - distance_mm;
        let percent = ((water_level_mm / self.max_water_level_mm) * 100.0).min(100.0);

        Reading {
            distance_mm,
            water_level_mm,
            percent,
        }
    }
}

/// One sensor reading with its derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sensor-to-surface distance.
    pub distance_mm: f64,
    /// Tank height minus distance.
    pub water_level_mm: f64,
    /// Water level as a percentage of the max level, capped at 100.
    pub percent: f64,
}

/// Round to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
