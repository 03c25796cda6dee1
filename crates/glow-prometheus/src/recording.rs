// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric descriptions and gateway recording helpers.
//!
//! The resilience and catalog crates emit their metrics through the
//! metrics-rs macros directly; this module only describes them.

use metrics::{describe_counter, describe_gauge, describe_histogram};

/// Register all Glow metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "glow_upstream_requests_total",
        "Upstream catalog fetches by outcome"
    );
    describe_counter!(
        "glow_upstream_retries_total",
        "Upstream fetch retries after recoverable errors"
    );
    describe_counter!("glow_circuit_open_total", "Times the circuit breaker opened");
    describe_counter!(
        "glow_circuit_rejections_total",
        "Upstream fetches rejected by an open circuit"
    );
    describe_counter!(
        "glow_catalog_queries_total",
        "Catalog queries by freshness source"
    );
    describe_gauge!(
        "glow_cache_age_seconds",
        "Age of the catalog data served by the last query"
    );
    describe_counter!("glow_http_requests_total", "HTTP requests by route and status");
    describe_histogram!(
        "glow_http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
}

/// Record one completed HTTP request.
pub fn record_http_request(route: &str, status: u16, seconds: f64) {
    metrics::counter!(
        "glow_http_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("glow_http_request_duration_seconds", "route" => route.to_string())
        .record(seconds);
}
