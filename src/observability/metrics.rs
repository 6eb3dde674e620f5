//! Metrics collection and exposition.
//!
//! # Metrics
//! - `contact_submissions_total` (counter): submissions by outcome
//! - `contact_rate_limited_total` (counter): submissions denied by the limiter
//! - `contact_persistence_duration_seconds` (histogram): durable insert latency
//! - `contact_rate_limit_entries` (gauge): origins tracked by the limiter
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: &'static str) {
    metrics::counter!("contact_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_rate_limited() {
    metrics::counter!("contact_rate_limited_total").increment(1);
}

pub fn record_persistence_duration(start: Instant) {
    metrics::histogram!("contact_persistence_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limit_entries(entries: usize) {
    metrics::gauge!("contact_rate_limit_entries").set(entries as f64);
}
