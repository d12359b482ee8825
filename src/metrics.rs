//! Prometheus metrics for the simulated sensor.
//!
//! All recording functions are no-ops until a recorder is installed, which
//! keeps them safe to call from tests.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::tank::SetOutcome;

// === Metric Name Constants ===

/// Measurements taken counter metric name.
pub const METRIC_MEASUREMENTS: &str = "tank_measurements_total";
/// Set-distance requests counter metric name.
pub const METRIC_SET_REQUESTS: &str = "tank_set_requests_total";
/// Randomizations counter metric name.
pub const METRIC_RANDOMIZATIONS: &str = "tank_randomizations_total";
/// Current distance gauge metric name.
pub const METRIC_DISTANCE: &str = "tank_distance_mm";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call this once at startup; the returned handle renders the exposition text.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_MEASUREMENTS, "Total number of simulated measurements");
    describe_counter!(
        METRIC_SET_REQUESTS,
        "Total number of set-distance requests by outcome"
    );
    describe_counter!(
        METRIC_RANDOMIZATIONS,
        "Total number of randomized distance jumps"
    );
    describe_gauge!(METRIC_DISTANCE, "Current simulated sensor distance in millimetres");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP handler latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment measurements counter.
pub fn inc_measurements() {
    counter!(METRIC_MEASUREMENTS).increment(1);
}

/// Increment set-distance counter for the given outcome.
pub fn inc_set_requests(outcome: SetOutcome) {
    let label: &'static str = outcome.into();
    counter!(METRIC_SET_REQUESTS, "outcome" => label).increment(1);
}

/// Increment randomizations counter.
pub fn inc_randomizations() {
    counter!(METRIC_RANDOMIZATIONS).increment(1);
}

/// Publish the current distance.
pub fn set_distance_gauge(distance_mm: f64) {
    gauge!(METRIC_DISTANCE).set(distance_mm);
}

/// RAII guard that records handler latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a handler.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        debug!(endpoint = self.endpoint, latency_ms, "handled request");
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("/test");
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 9.0);
    }

    #[test]
    fn latency_timer_records_on_drop() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            let _timer = LatencyTimer::new("/height");
        });

        let rendered = handle.render();
        assert!(rendered.contains(METRIC_HTTP_REQUEST_LATENCY));
        assert!(rendered.contains(r#"endpoint="/height""#));
    }

    #[test]
    fn recording_without_recorder_is_harmless() {
        inc_measurements();
        inc_set_requests(SetOutcome::Ignored);
        inc_randomizations();
        set_distance_gauge(250.0);
    }
}
