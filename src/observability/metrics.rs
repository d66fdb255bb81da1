//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): total requests by endpoint, status
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Labels carry the matched route template, never the raw URL, so
//!   caller-supplied upstream URLs cannot explode label cardinality
//! - Exposition via the Prometheus exporter on its own listener, off by
//!   default

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed inbound request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    let labels = [
        ("endpoint", endpoint.to_string()),
        ("status", status.to_string()),
    ];
    counter!("proxy_requests_total", &labels).increment(1);
    histogram!("proxy_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
