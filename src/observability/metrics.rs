//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define storefront metrics (procedure calls, rendered outcomes)
//! - Expose a Prometheus-compatible scrape endpoint when enabled
//!
//! # Metrics
//! - `storefront_procedure_calls_total` (counter): calls by procedure, outcome
//! - `storefront_procedure_duration_seconds` (histogram): procedure latency
//! - `storefront_requests_total` (counter): responses by route, outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; with no exporter installed
//!   every call is a no-op, so tests need no setup
//! - Outcome labels are a closed set (`ok`/`error`, `page`/`redirect`/`failure`)

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus metrics exporter started");
    Ok(())
}

/// Record one stored-procedure invocation.
pub fn record_procedure(procedure: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "storefront_procedure_calls_total",
        "procedure" => procedure,
        "outcome" => outcome
    )
    .increment(1);

    ::metrics::histogram!(
        "storefront_procedure_duration_seconds",
        "procedure" => procedure
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record how a route answered.
pub fn record_request(route: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "storefront_requests_total",
        "route" => route,
        "outcome" => outcome
    )
    .increment(1);
}
