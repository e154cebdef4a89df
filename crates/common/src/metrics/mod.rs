//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all stitchline metrics
pub const METRICS_PREFIX: &str = "stitchline";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
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
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Order import metrics
    describe_counter!(
        format!("{}_orders_imported_total", METRICS_PREFIX),
        Unit::Count,
        "Total purchase orders imported"
    );

    describe_counter!(
        format!("{}_order_lines_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total order lines created"
    );

    // Production tracking metrics
    describe_counter!(
        format!("{}_production_records_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total production records registered"
    );

    // Scheduler metrics
    describe_counter!(
        format!("{}_recompute_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total priority recompute passes"
    );

    describe_counter!(
        format!("{}_recompute_records_updated_total", METRICS_PREFIX),
        Unit::Count,
        "Total production records updated by recompute passes"
    );

    describe_counter!(
        format!("{}_recompute_records_skipped_total", METRICS_PREFIX),
        Unit::Count,
        "Total records skipped by recompute passes (missing issuance date)"
    );

    describe_histogram!(
        format!("{}_recompute_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Priority recompute pass latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record one priority recompute pass
pub struct RecomputeMetrics {
    start: Instant,
}

impl RecomputeMetrics {
    /// Start timing a recompute pass
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Record pass completion, returning the elapsed time
    pub fn finish(self, updated: usize, skipped: usize) -> std::time::Duration {
        let elapsed = self.start.elapsed();
        counter!(format!("{}_recompute_runs_total", METRICS_PREFIX)).increment(1);
        counter!(format!("{}_recompute_records_updated_total", METRICS_PREFIX))
            .increment(updated as u64);
        counter!(format!("{}_recompute_records_skipped_total", METRICS_PREFIX))
            .increment(skipped as u64);
        histogram!(format!("{}_recompute_duration_seconds", METRICS_PREFIX))
            .record(elapsed.as_secs_f64());
        elapsed
    }
}

/// Increment the imported-orders counters
pub fn record_order_imported(line_count: usize) {
    counter!(format!("{}_orders_imported_total", METRICS_PREFIX)).increment(1);
    counter!(format!("{}_order_lines_created_total", METRICS_PREFIX))
        .increment(line_count as u64);
}

/// Increment the production-record counter
pub fn record_production_created() {
    counter!(format!("{}_production_records_created_total", METRICS_PREFIX)).increment(1);
}
