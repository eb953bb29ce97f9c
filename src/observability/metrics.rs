//! Metrics collection and exposition.
//!
//! # Metrics
//! - `task_service_requests_total` (counter): requests by method, route, status
//! - `task_service_request_duration_seconds` (histogram): latency by method, route
//! - `task_service_tasks` (gauge): records in the tasks table
//!
//! Without an installed recorder every call is a no-op, so handlers and
//! tests record unconditionally.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one served request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "task_service_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "task_service_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored tasks.
pub fn record_task_count(count: usize) {
    metrics::gauge!("task_service_tasks").set(count as f64);
}
