//! Namespace resolution.
//!
//! A metric namespace is resolved by position, never by pattern: segment 3 is
//! the interface and the terminal segment must be one of the eight statistic
//! literals.

use crate::error::{NetStatError, Result};
use crate::types::namespace::{INTERFACE_INDEX, METRIC_DEPTH};
use crate::types::{MetricNamespace, StatisticKind, NAMESPACE_ROOT, NET_SEGMENT};

/// The (interface, statistic) pair a namespace addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricTarget<'a> {
    pub interface: &'a str,
    pub kind: StatisticKind,
}

/// Classify `namespace` into the counter it names.
///
/// Fails with `InvalidNamespace` when the namespace is too short or is not
/// rooted at `/libvirt/<domain>/net`, and with `UnrecognizedStatistic` when the
/// terminal segment is not a known statistic.
pub fn resolve(namespace: &MetricNamespace) -> Result<MetricTarget<'_>> {
    if namespace.len() < METRIC_DEPTH {
        return Err(NetStatError::InvalidNamespace {
            namespace: namespace.clone(),
            reason: format!(
                "expected at least {} segments, got {}",
                METRIC_DEPTH,
                namespace.len()
            ),
        });
    }

    if namespace.segment(0) != Some(NAMESPACE_ROOT) {
        return Err(NetStatError::InvalidNamespace {
            namespace: namespace.clone(),
            reason: format!("root segment must be '{}'", NAMESPACE_ROOT),
        });
    }

    if namespace.segment(2) != Some(NET_SEGMENT) {
        return Err(NetStatError::InvalidNamespace {
            namespace: namespace.clone(),
            reason: format!("segment 2 must be '{}'", NET_SEGMENT),
        });
    }

    let kind = namespace
        .last()
        .and_then(StatisticKind::from_literal)
        .ok_or_else(|| NetStatError::UnrecognizedStatistic { namespace: namespace.clone() })?;

    // Length was checked above, so index 3 exists.
    let interface = namespace.segments()[INTERFACE_INDEX].as_str();

    Ok(MetricTarget { interface, kind })
}
