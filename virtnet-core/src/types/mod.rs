//! Core domain types for virtnet.

pub mod namespace;
pub mod sample;

// Re-exports
pub use namespace::{MetricNamespace, StatisticKind, NAMESPACE_ROOT, NET_SEGMENT};
pub use sample::{InterfaceStats, MetricSample};
