//! Metrics for the lineup service
//!
//! Prometheus counters and histograms for HTTP traffic, profile lookups and
//! solver runs, exposed by the web layer at `/metrics`.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, ProfileMetrics, RequestMetrics, SolverMetrics};

use prometheus::{Encoder, TextEncoder};

/// Render all metrics in Prometheus text format
pub fn render_metrics(collector: &MetricsCollector) -> anyhow::Result<String> {
    let metric_families = collector.registry().gather();
    let encoder = TextEncoder::new();

    encoder
        .encode_to_string(&metric_families)
        .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))
}

/// Content type of [`render_metrics`] output
pub fn metrics_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
