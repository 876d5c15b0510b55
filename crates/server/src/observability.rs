use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter, Encoder, Histogram, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static INCREMENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "counter_api_increments_total",
        "Total successful counter increments"
    )
    .expect("register increments_total")
});

pub static INCREMENT_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "counter_api_increment_errors_total",
        "Total failed counter increments"
    )
    .expect("register increment_errors_total")
});

pub static INCREMENT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "counter_api_increment_duration_seconds",
        "Increment latency in seconds, including commit",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register increment_duration")
});

/// Touch every metric so it shows up in `/metrics` before the first request.
pub fn init_metrics() {
    Lazy::force(&INCREMENTS_TOTAL);
    Lazy::force(&INCREMENT_ERRORS_TOTAL);
    Lazy::force(&INCREMENT_DURATION);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
