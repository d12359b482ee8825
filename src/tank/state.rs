//! Shared sensor state and the operations that mutate it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::{Display, IntoStaticStr};
use tracing::debug;

use super::conversion::{round_tenth, Reading, TankGeometry, DEFAULT_DISTANCE_MM};
use super::input::DistanceInput;
use crate::metrics;

/// Tunables for the simulated sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSettings {
    /// Tank dimensions used for every conversion.
    pub geometry: TankGeometry,
    /// Distance at startup.
    pub initial_distance_mm: f64,
    /// Amplitude of the jitter added by a measurement.
    pub jitter_mm: f64,
    /// Lower bound for a randomized distance.
    pub random_min_mm: f64,
    /// Upper bound for a randomized distance.
    pub random_max_mm: f64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            geometry: TankGeometry::default(),
            initial_distance_mm: DEFAULT_DISTANCE_MM,
            jitter_mm: 1.0,
            random_min_mm: 200.0,
            random_max_mm: 400.0,
        }
    }
}

/// What a set-distance request did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SetOutcome {
    /// The requested distance was stored.
    Applied,
    /// The request was out of range or unusable.
    Ignored,
}

#[derive(Debug)]
struct Inner {
    distance_mm: f64,
    rng: StdRng,
}

/// The single simulated sensor, shared by all request handlers.
///
/// Every operation is one short read-modify-write under a single lock, so
/// concurrent writers resolve as last-write-wins.
#[derive(Debug)]
pub struct SensorState {
    settings: SensorSettings,
    inner: Mutex<Inner>,
}

impl SensorState {
    /// Create a sensor seeded from OS entropy.
    pub fn new(settings: SensorSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create a sensor with a caller-supplied RNG.
    pub fn with_rng(settings: SensorSettings, rng: StdRng) -> Self {
        let distance_mm = settings.geometry.clamp_distance(settings.initial_distance_mm);
        metrics::set_distance_gauge(distance_mm);

        Self {
            settings,
            inner: Mutex::new(Inner { distance_mm, rng }),
        }
    }

    /// Create a sensor with a fixed seed.
    pub fn seeded(settings: SensorSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    /// Sensor settings.
    pub fn settings(&self) -> &SensorSettings {
        &self.settings
    }

    /// Tank geometry.
    pub fn geometry(&self) -> TankGeometry {
        self.settings.geometry
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The guarded distance is always a valid, clamped value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current reading without touching the state.
    pub fn current(&self) -> Reading {
        let distance_mm = self.lock().distance_mm;
        self.settings.geometry.reading(distance_mm)
    }

    /// Take a new measurement: jitter the distance and clamp it to the tank.
    pub fn measure(&self) -> Reading {
        let jitter = self.settings.jitter_mm;
        let distance_mm = {
            let mut inner = self.lock();
            let delta = if jitter > 0.0 {
                inner.rng.gen_range(-jitter..=jitter)
            } else {
                0.0
            };
            inner.distance_mm = self.settings.geometry.clamp_distance(inner.distance_mm + delta);
            inner.distance_mm
        };

        debug!(distance_mm, "measured");
        metrics::inc_measurements();
        metrics::set_distance_gauge(distance_mm);
        self.settings.geometry.reading(distance_mm)
    }

    /// Store a requested distance if it lies within the tank.
    ///
    /// Out-of-range and unusable input leave the state untouched; either way
    /// the resulting reading is returned.
    pub fn set_distance(&self, input: DistanceInput) -> Reading {
        let geometry = self.settings.geometry;
        let (outcome, distance_mm) = {
            let mut inner = self.lock();

            match input {
                DistanceInput::Value(requested) if geometry.contains(requested) => {
                    inner.distance_mm = requested;
                    (SetOutcome::Applied, requested)
                }
                DistanceInput::Value(requested) => {
                    debug!(requested, "ignoring out-of-range distance");
                    (SetOutcome::Ignored, inner.distance_mm)
                }
                DistanceInput::Fallback => {
                    debug!("no usable distance_mm in request, keeping current value");
                    (SetOutcome::Ignored, inner.distance_mm)
                }
            }
        };

        metrics::inc_set_requests(outcome);
        metrics::set_distance_gauge(distance_mm);
        geometry.reading(distance_mm)
    }

    /// Jump to a random distance within the configured bounds.
    pub fn randomize(&self) -> Reading {
        let SensorSettings {
            random_min_mm,
            random_max_mm,
            ..
        } = self.settings;

        let distance_mm = {
            let mut inner = self.lock();
            let raw = inner.rng.gen_range(random_min_mm..=random_max_mm);
            inner.distance_mm = self.settings.geometry.clamp_distance(round_tenth(raw));
            inner.distance_mm
        };

        debug!(distance_mm, "randomized");
        metrics::inc_randomizations();
        metrics::set_distance_gauge(distance_mm);
        self.settings.geometry.reading(distance_mm)
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::new(SensorSettings::default())
    }
}
