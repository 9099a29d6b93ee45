//! Self-metrics definitions.
//!
//! All metrics follow Prometheus naming conventions:
//! - `_total` suffix for counters
//! - `_seconds` suffix for histograms measuring duration

use crate::types::StatisticKind;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

/// Register all self-metrics with descriptions.
pub fn register_core_metrics() {
    describe_counter!(
        "virtnet_stat_fetches_total",
        "Interface statistics successfully collected (by kind)"
    );
    describe_counter!(
        "virtnet_stat_fetch_failures_total",
        "Interface statistics that could not be collected (by kind, reason)"
    );
    describe_histogram!(
        "virtnet_stat_fetch_duration_seconds",
        "Time spent in one interface statistics round-trip"
    );
    describe_counter!("virtnet_catalog_builds_total", "Catalog listings (by outcome)");
    describe_gauge!("virtnet_catalog_size", "Metrics advertised for a domain (by domain)");
}

pub fn record_fetch(kind: StatisticKind) {
    counter!("virtnet_stat_fetches_total", "kind" => kind.as_str()).increment(1);
}

/// `kind` is `None` when the namespace did not name a known statistic.
pub fn record_fetch_failure(kind: Option<StatisticKind>, reason: &'static str) {
    let kind = kind.map(|k| k.as_str()).unwrap_or("unknown");
    counter!("virtnet_stat_fetch_failures_total", "kind" => kind, "reason" => reason)
        .increment(1);
}

pub fn record_fetch_duration(duration_secs: f64) {
    histogram!("virtnet_stat_fetch_duration_seconds").record(duration_secs);
}

pub fn record_catalog(domain: &str, size: usize) {
    counter!("virtnet_catalog_builds_total", "outcome" => "ok").increment(1);
    gauge!("virtnet_catalog_size", "domain" => domain.to_string()).set(size as f64);
}

pub fn record_catalog_failure() {
    counter!("virtnet_catalog_builds_total", "outcome" => "error").increment(1);
}
