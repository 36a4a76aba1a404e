//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_commands_total` (counter): upstream commands by command, status
//! - `gateway_command_duration_seconds` (histogram): upstream exchange latency
//!
//! Recording is a no-op until the exporter is installed, so the library and
//! its tests never pay for or depend on a live endpoint.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Failure to install is logged, not fatal: the gateway serves traffic
/// either way.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "Failed to install metrics exporter"),
    }
}

/// Record one completed upstream exchange.
pub fn record_command(command: &'static str, status: &str, started: Instant) {
    counter!(
        "gateway_commands_total",
        "command" => command,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "gateway_command_duration_seconds",
        "command" => command
    )
    .record(started.elapsed().as_secs_f64());
}
