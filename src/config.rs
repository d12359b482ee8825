//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::tank::{SensorSettings, TankGeometry, MAX_WATER_LEVEL_MM, TANK_HEIGHT_MM};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Tank Geometry ===
    /// Distance from the sensor to the tank floor.
    #[serde(default = "default_tank_height")]
    pub tank_height_mm: f64,

    /// Water level reported as 100%.
    #[serde(default = "default_max_water_level")]
    pub max_water_level_mm: f64,

    // === Simulation ===
    /// Distance reported right after startup.
    #[serde(default = "default_initial_distance")]
    pub initial_distance_mm: f64,

    /// Amplitude of the random jitter applied per measurement.
    #[serde(default = "default_jitter")]
    pub jitter_mm: f64,

    /// Lower bound for `/random`.
    #[serde(default = "default_random_min")]
    pub random_min_mm: f64,

    /// Upper bound for `/random`.
    #[serde(default = "default_random_max")]
    pub random_max_mm: f64,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    80
}

fn default_tank_height() -> f64 {
    TANK_HEIGHT_MM
}

fn default_max_water_level() -> f64 {
    MAX_WATER_LEVEL_MM
}

fn default_initial_distance() -> f64 {
    crate::tank::DEFAULT_DISTANCE_MM
}

fn default_jitter() -> f64 {
    1.0
}

fn default_random_min() -> f64 {
    200.0
}

fn default_random_max() -> f64 {
    400.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            tank_height_mm: default_tank_height(),
            max_water_level_mm: default_max_water_level(),
            initial_distance_mm: default_initial_distance(),
            jitter_mm: default_jitter(),
            random_min_mm: default_random_min(),
            random_max_mm: default_random_max(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let height = self.tank_height_mm;

        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::TankHeight(height));
        }

        if !(self.max_water_level_mm.is_finite() && self.max_water_level_mm > 0.0) {
            return Err(ConfigError::MaxWaterLevel(self.max_water_level_mm));
        }

        if !(0.0..=height).contains(&self.initial_distance_mm) {
            return Err(ConfigError::InitialDistance {
                distance_mm: self.initial_distance_mm,
                tank_height_mm: height,
            });
        }

        if !(self.jitter_mm.is_finite() && self.jitter_mm >= 0.0) {
            return Err(ConfigError::Jitter(self.jitter_mm));
        }

        let bounds = 0.0..=height;
        if !(bounds.contains(&self.random_min_mm)
            && bounds.contains(&self.random_max_mm)
            && self.random_min_mm <= self.random_max_mm)
        {
            return Err(ConfigError::RandomRange {
                min_mm: self.random_min_mm,
                max_mm: self.random_max_mm,
                tank_height_mm: height,
            });
        }

        Ok(())
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Tank geometry described by this configuration.
    pub fn geometry(&self) -> TankGeometry {
        TankGeometry::new(self.tank_height_mm, self.max_water_level_mm)
    }

    /// Sensor settings described by this configuration.
    pub fn sensor_settings(&self) -> SensorSettings {
        SensorSettings {
            geometry: self.geometry(),
            initial_distance_mm: self.initial_distance_mm,
            jitter_mm: self.jitter_mm,
            random_min_mm: self.random_min_mm,
            random_max_mm: self.random_max_mm,
        }
    }
}
