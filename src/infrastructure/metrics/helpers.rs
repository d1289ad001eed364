//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{PLACEHOLDERS_TOTAL, RENDERS_TOTAL, RENDER_FAILURES_TOTAL, RENDER_LATENCY};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording formatter metrics
pub struct FormatterMetrics;

impl FormatterMetrics {
    /// Record a render by mode ("text", "script", "empty")
    pub fn record_render(mode: &str) {
        RENDERS_TOTAL.with_label_values(&[mode]).inc();
    }

    /// Record a placeholder by strategy ("pattern", "span", "path", "value", "unmatched")
    pub fn record_placeholder(strategy: &str) {
        PLACEHOLDERS_TOTAL.with_label_values(&[strategy]).inc();
    }

    /// Record a failed render
    pub fn record_failure() {
        RENDER_FAILURES_TOTAL.inc();
    }

    /// Record render latency in seconds
    pub fn record_latency(seconds: f64) {
        RENDER_LATENCY.observe(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_metrics_are_encoded() {
        FormatterMetrics::record_render("text");
        FormatterMetrics::record_placeholder("pattern");
        FormatterMetrics::record_latency(0.002);

        let text = encode_metrics().unwrap();

        assert!(text.contains("rule_formatter_renders_total"));
        assert!(text.contains("rule_formatter_placeholders_total"));
        assert!(text.contains("rule_formatter_render_latency_seconds"));
    }
}
