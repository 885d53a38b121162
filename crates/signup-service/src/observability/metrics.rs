//! Metrics definitions for the signup service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `signup_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! - `outcome`: bounded by `SignupError::outcome` plus `success`
//! - `status`: `2xx`, `accepted`, `rejected`, `timeout`, `error`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Upstream latency buckets; the default upstream timeout is 5s.
const UPSTREAM_DURATION_BUCKETS: &[f64] = &[
    0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.000, 5.000, 10.000,
];

fn builder() -> Result<PrometheusBuilder, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("signup_upstream".to_string()),
            UPSTREAM_DURATION_BUCKETS,
        )
        .map_err(|e| format!("Failed to set upstream buckets: {e}"))
}

/// Install the global Prometheus recorder and return its handle.
///
/// Must be called once, before any metric is recorded.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    builder()?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Build a handle without installing a global recorder.
///
/// For test servers: several may run in one process.
pub fn detached_metrics_handle() -> Result<PrometheusHandle, String> {
    Ok(builder()?.build_recorder().handle())
}

/// Record the terminal outcome of one signup request.
///
/// Metric: `signup_requests_total`
/// Labels: `outcome`
pub fn record_signup(outcome: &'static str) {
    counter!("signup_requests_total", "outcome" => outcome).increment(1);
}

/// Record one upstream member-creation call.
///
/// Metrics: `signup_upstream_requests_total`, `signup_upstream_duration_seconds`
/// Labels: `status`
pub fn record_upstream_request(status: &'static str, duration: Duration) {
    counter!("signup_upstream_requests_total", "status" => status).increment(1);
    histogram!("signup_upstream_duration_seconds", "status" => status)
        .record(duration.as_secs_f64());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // No recorder is installed here; recording must be a no-op, not a panic.
    #[test]
    fn test_record_without_recorder() {
        record_signup("success");
        record_upstream_request("2xx", Duration::from_millis(42));
    }

    #[test]
    fn test_detached_handle_renders() {
        let handle = detached_metrics_handle().unwrap();
        let rendered = handle.render();
        assert!(!rendered.contains("signup_requests_total{outcome=\"bogus\"}"));
    }
}
