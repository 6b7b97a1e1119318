//! Metrics collection and exposition.
//!
//! # Metrics
//! - `specforge_generations_total` (counter): generation requests by outcome
//! - `specforge_mock_requests_total` (counter): live mock calls by path, status
//! - `specforge_mock_request_duration_seconds` (histogram): live mock latency
//! - `specforge_downloads_total` (counter): artifact downloads by status
//! - `specforge_live_routes` (gauge): paths currently in the live route table
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so tests need no setup
//! - Exporter only started when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Outcome label for a generation request.
pub fn record_generation(outcome: &'static str) {
    counter!("specforge_generations_total", "outcome" => outcome).increment(1);
}

pub fn record_mock_request(path: &str, status: u16, start: Instant) {
    counter!(
        "specforge_mock_requests_total",
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("specforge_mock_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_download(status: u16) {
    counter!("specforge_downloads_total", "status" => status.to_string()).increment(1);
}

pub fn record_live_routes(count: usize) {
    gauge!("specforge_live_routes").set(count as f64);
}
