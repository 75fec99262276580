//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, endpoint
//! - `http_request_duration_seconds` (histogram): latency by method, endpoint
//!
//! # Design Decisions
//! - Request handling records through the [`RequestMetrics`] trait, so tests
//!   can swap in a recorder without a global exporter
//! - The production implementation goes through the `metrics` facade; the
//!   Prometheus recorder is installed once at startup
//! - Histogram buckets are the Prometheus client defaults

use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Prometheus client default buckets, in seconds.
pub const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Sink for per-request metrics. Implementations must tolerate concurrent
/// calls from every request task.
pub trait RequestMetrics: Send + Sync {
    /// Count one inbound request.
    fn increment_requests(&self, method: &str, endpoint: &str);

    /// Record how long one inbound request took.
    fn observe_duration(&self, method: &str, endpoint: &str, elapsed: Duration);
}

/// Records through the global `metrics` recorder.
///
/// Without an installed recorder every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusMetrics;

impl RequestMetrics for PrometheusMetrics {
    fn increment_requests(&self, method: &str, endpoint: &str) {
        metrics::counter!(
            REQUESTS_TOTAL,
            "method" => method.to_owned(),
            "endpoint" => endpoint.to_owned()
        )
        .increment(1);
    }

    fn observe_duration(&self, method: &str, endpoint: &str, elapsed: Duration) {
        metrics::histogram!(
            REQUEST_DURATION_SECONDS,
            "method" => method.to_owned(),
            "endpoint" => endpoint.to_owned()
        )
        .record(elapsed.as_secs_f64());
    }
}

/// Install the process-wide Prometheus recorder and return its render handle.
///
/// Can only succeed once per process.
pub fn install_exporter() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            &DURATION_BUCKETS,
        )?
        .install_recorder()?;

    metrics::describe_counter!(REQUESTS_TOTAL, "Total number of HTTP requests.");
    metrics::describe_histogram!(
        REQUEST_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Duration of HTTP requests in seconds."
    );

    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

/// Periodically drain histogram buffers held by the recorder.
pub async fn run_upkeep(handle: PrometheusHandle, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        handle.run_upkeep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_without_recorder_is_noop() {
        let metrics = PrometheusMetrics;
        metrics.increment_requests("GET", "/deals");
        metrics.observe_duration("GET", "/deals", Duration::from_millis(12));
    }

    #[test]
    fn test_buckets_are_sorted() {
        assert!(DURATION_BUCKETS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(DURATION_BUCKETS.last(), Some(&10.0));
    }
}
