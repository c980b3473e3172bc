//! Metrics collection and exposition.
//!
//! # Metrics
//! - `searx_proxy_requests_total` (counter): inbound requests by method, status
//! - `searx_proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `searx_proxy_upstream_attempts_total` (counter): attempts by upstream, outcome
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus endpoint only when enabled in config

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus metrics endpoint initialized");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "searx_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("searx_proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one upstream attempt.
pub fn record_attempt(upstream: &str, outcome: &'static str) {
    counter!(
        "searx_proxy_upstream_attempts_total",
        "upstream" => upstream.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
