//! Prometheus metrics for car query observability.

use metrics::{counter, histogram};

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record the outcome of a `/cars` query (`ok`, `invalid`, `store_error`).
pub fn query_completed(outcome: &'static str) {
    counter!("car_queries_total", "outcome" => outcome).increment(1);
}

/// Record store round-trip duration.
pub fn query_duration(duration_ms: u64) {
    histogram!("car_query_duration_ms").record(duration_ms as f64);
}

/// Record how many records a query returned.
pub fn results_returned(count: usize) {
    histogram!("car_results_returned").record(count as f64);
}
