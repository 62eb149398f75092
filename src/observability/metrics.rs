//! Metrics collection and exposition.
//!
//! # Metrics
//! - `runner_requests_total` (counter): invocations by method, status
//! - `runner_request_duration_seconds` (histogram): latency distribution
//! - `runner_downstream_failures_total` (counter): failed deliveries by url
//!
//! # Design Decisions
//! - Metric updates are cheap counter/histogram writes on the request path
//! - The Prometheus scrape endpoint is optional and off by default

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one handled invocation.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "runner_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "runner_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one failed downstream delivery.
pub fn record_downstream_failure(url: &str) {
    metrics::counter!("runner_downstream_failures_total", "url" => url.to_string()).increment(1);
}
