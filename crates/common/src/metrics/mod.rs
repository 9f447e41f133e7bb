//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Blog Summariser metrics
pub const METRICS_PREFIX: &str = "blogsum";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Scrape metrics
    describe_counter!(
        format!("{}_scrapes_total", METRICS_PREFIX),
        Unit::Count,
        "Total scrape requests served"
    );

    // Store metrics
    describe_counter!(
        format!("{}_store_writes_total", METRICS_PREFIX),
        Unit::Count,
        "Store writes by store and outcome"
    );

    describe_counter!(
        format!("{}_compensations_total", METRICS_PREFIX),
        Unit::Count,
        "Relational rows deleted after a failed document write"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a served scrape
pub fn record_scrape(scraper: &str) {
    counter!(
        format!("{}_scrapes_total", METRICS_PREFIX),
        "scraper" => scraper.to_string()
    )
    .increment(1);
}

/// Helper to record one side of a save
pub fn record_store_write(store: &str, outcome: &str) {
    counter!(
        format!("{}_store_writes_total", METRICS_PREFIX),
        "store" => store.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Helper to record a compensating delete
pub fn record_compensation() {
    counter!(format!("{}_compensations_total", METRICS_PREFIX)).increment(1);
}
