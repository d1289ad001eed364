//! Prometheus metrics for the rule event formatter.
//!
//! - Render metrics (renders by mode, failures, latency)
//! - Placeholder metrics (placeholders by resolution strategy)

mod helpers;

pub use helpers::{encode_metrics, FormatterMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "rule_formatter";

lazy_static! {
    /// Templates rendered, by mode (text, script, empty)
    pub static ref RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_renders_total", METRIC_PREFIX),
        "Total templates rendered",
        &["mode"]
    ).unwrap();

    /// Renders aborted by an extension or script failure
    pub static ref RENDER_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_render_failures_total", METRIC_PREFIX),
        "Total renders that failed"
    ).unwrap();

    /// Time to render one template, including async placeholder resolution
    pub static ref RENDER_LATENCY: Histogram = register_histogram!(
        format!("{}_render_latency_seconds", METRIC_PREFIX),
        "Template render latency in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();

    /// Placeholders seen after a `$` marker, by strategy that resolved them
    pub static ref PLACEHOLDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_placeholders_total", METRIC_PREFIX),
        "Total placeholders by resolution strategy",
        &["strategy"]
    ).unwrap();
}
