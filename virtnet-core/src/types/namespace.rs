//! Hierarchical metric identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetStatError;

/// Fixed root tag at segment 0 of every namespace.
pub const NAMESPACE_ROOT: &str = "libvirt";

/// Marker segment separating the domain name from the interface name.
pub const NET_SEGMENT: &str = "net";

/// Index of the interface name in a fully resolved namespace.
pub const INTERFACE_INDEX: usize = 3;

/// Segment count of a namespace that addresses exactly one metric.
pub const METRIC_DEPTH: usize = 5;

/// Network counter tracked per interface.
///
/// The declaration order is the catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    RxBytes,
    RxPackets,
    RxErrs,
    RxDrop,
    TxBytes,
    TxPackets,
    TxErrs,
    TxDrop,
}

impl StatisticKind {
    /// Every kind, in catalog order.
    pub const ALL: [StatisticKind; 8] = [
        Self::RxBytes,
        Self::RxPackets,
        Self::RxErrs,
        Self::RxDrop,
        Self::TxBytes,
        Self::TxPackets,
        Self::TxErrs,
        Self::TxDrop,
    ];

    /// Namespace literal for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RxBytes => "rxbytes",
            Self::RxPackets => "rxpackets",
            Self::RxErrs => "rxerrs",
            Self::RxDrop => "rxdrop",
            Self::TxBytes => "txbytes",
            Self::TxPackets => "txpackets",
            Self::TxErrs => "txerrs",
            Self::TxDrop => "txdrop",
        }
    }

    /// Structural lookup of a namespace literal. No pattern matching involved.
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == literal)
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatisticKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(s).ok_or_else(|| format!("unknown statistic kind: {}", s))
    }
}

/// Ordered segments naming one metric, or a group of metrics when shorter.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricNamespace(Vec<String>);

impl MetricNamespace {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// `[root, domain, "net", interface, kind]`
    pub fn for_metric(domain: &str, interface: &str, kind: StatisticKind) -> Self {
        Self(vec![
            NAMESPACE_ROOT.to_string(),
            domain.to_string(),
            NET_SEGMENT.to_string(),
            interface.to_string(),
            kind.as_str().to_string(),
        ])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Terminal segment.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Prefix addressing: every segment of `prefix` equals the segment at the
    /// same position here.
    pub fn starts_with(&self, prefix: &MetricNamespace) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for MetricNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for MetricNamespace {
    type Err = NetStatError;

    /// Parses the `/`-joined text form, e.g. `/libvirt/vm1/net/vnet0/rxbytes`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('/').trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(NetStatError::InvalidNamespace {
                namespace: MetricNamespace::new([s]),
                reason: "namespace has no segments".to_string(),
            });
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(NetStatError::InvalidNamespace {
                namespace: MetricNamespace::new([s]),
                reason: "namespace contains an empty segment".to_string(),
            });
        }

        Ok(Self::new(segments))
    }
}

impl From<Vec<String>> for MetricNamespace {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_literals_round_trip() {
        for kind in StatisticKind::ALL {
            assert_eq!(StatisticKind::from_literal(kind.as_str()), Some(kind));
        }
        assert_eq!(StatisticKind::from_literal("RXBYTES"), None);
        assert_eq!(StatisticKind::from_literal("rxbytes_total"), None);
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&StatisticKind::TxPackets).unwrap();
        assert_eq!(json, r#""txpackets""#);
    }

    #[test]
    fn test_namespace_display_and_parse() {
        let ns = MetricNamespace::for_metric("vm1", "vnet0", StatisticKind::RxBytes);
        assert_eq!(ns.to_string(), "/libvirt/vm1/net/vnet0/rxbytes");

        let parsed: MetricNamespace = "/libvirt/vm1/net/vnet0/rxbytes".parse().unwrap();
        assert_eq!(parsed, ns);

        let no_slash: MetricNamespace = "libvirt/vm1/net".parse().unwrap();
        assert_eq!(no_slash.len(), 3);
    }

    #[test]
    fn test_namespace_parse_rejects_empty() {
        assert!("".parse::<MetricNamespace>().is_err());
        assert!("/".parse::<MetricNamespace>().is_err());
        assert!("/libvirt//net".parse::<MetricNamespace>().is_err());
    }

    #[test]
    fn test_prefix_addressing() {
        let ns = MetricNamespace::for_metric("vm1", "vnet0", StatisticKind::TxDrop);
        assert!(ns.starts_with(&MetricNamespace::new(["libvirt", "vm1"])));
        assert!(ns.starts_with(&MetricNamespace::new(["libvirt", "vm1", "net", "vnet0"])));
        assert!(!ns.starts_with(&MetricNamespace::new(["libvirt", "vm2"])));
        assert!(ns.starts_with(&MetricNamespace::new(Vec::<String>::new())));
    }

    #[test]
    fn test_namespace_serializes_as_segment_list() {
        let ns = MetricNamespace::for_metric("vm1", "vnet0", StatisticKind::RxDrop);
        let json = serde_json::to_string(&ns).unwrap();
        assert_eq!(json, r#"["libvirt","vm1","net","vnet0","rxdrop"]"#);
    }
}
