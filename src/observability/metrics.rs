//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by outcome and status
//! - `gateway_forward_duration_seconds` (histogram): upstream latency
//! - `gateway_reloads_total` (counter): reload attempts by result
//! - `gateway_routes_active` (gauge): active routes in the current table
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// A request answered without contacting a backend (health, not found).
pub fn record_local(status: u16, outcome: &'static str) {
    metrics::counter!("gateway_requests_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
}

/// A request that went through the forwarder.
pub fn record_forward(status: u16, outcome: &'static str, start: Instant) {
    record_local(status, outcome);
    metrics::histogram!("gateway_forward_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// A reload attempt, and the size of the table now serving.
pub fn record_reload(success: bool, active_routes: usize) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("gateway_reloads_total", "result" => result).increment(1);
    metrics::gauge!("gateway_routes_active").set(active_routes as f64);
}
