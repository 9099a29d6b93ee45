//! Error types for virtnet.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::MetricNamespace;

/// Result type alias for virtnet operations.
pub type Result<T> = std::result::Result<T, NetStatError>;

/// Failure reported by the hypervisor collaborator.
///
/// Cloneable so one failed statistics bundle can be attributed to every
/// metric that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HypervisorError {
    /// Backend-specific error code, when the backend has one
    pub code: Option<i32>,
    pub message: String,
}

impl HypervisorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: message.into() }
    }
}

/// Main error type for virtnet.
#[derive(Error, Debug)]
pub enum NetStatError {
    // Domain discovery errors
    #[error("Domain description unavailable: {reason}")]
    ConfigUnavailable { reason: String },

    #[error("Domain name unavailable: {cause}")]
    NameUnavailable {
        #[source]
        cause: HypervisorError,
    },

    // Namespace errors
    #[error("Unrecognized statistic in namespace {namespace}")]
    UnrecognizedStatistic { namespace: MetricNamespace },

    #[error("Invalid namespace {namespace}: {reason}")]
    InvalidNamespace { namespace: MetricNamespace, reason: String },

    // Fetch errors
    #[error("Interface statistics query failed for {domain}/{interface}: {cause}")]
    HypervisorQueryFailed {
        domain: String,
        interface: String,
        #[source]
        cause: HypervisorError,
    },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NetStatError {
    /// Whether this error belongs to a single requested metric rather than
    /// the whole domain.
    ///
    /// Batch callers use this to keep reporting sibling metrics.
    pub fn is_scoped_to_metric(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedStatistic { .. }
                | Self::InvalidNamespace { .. }
                | Self::HypervisorQueryFailed { .. }
        )
    }

    /// Short label used for failure metrics.
    pub fn reason_label(&self) -> &'static str {
        match self {
            Self::ConfigUnavailable { .. } => "config_unavailable",
            Self::NameUnavailable { .. } => "name_unavailable",
            Self::UnrecognizedStatistic { .. } => "unrecognized_statistic",
            Self::InvalidNamespace { .. } => "invalid_namespace",
            Self::HypervisorQueryFailed { .. } => "hypervisor_query_failed",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::IoError { .. } => "io_error",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_failure_names_domain_and_interface() {
        let err = NetStatError::HypervisorQueryFailed {
            domain: "vm1".to_string(),
            interface: "vnet1".to_string(),
            cause: HypervisorError::with_code(55, "no such interface"),
        };
        let msg = err.to_string();
        assert!(msg.contains("vm1/vnet1"));
        assert!(msg.contains("no such interface"));
        assert!(err.is_scoped_to_metric());
    }

    #[test]
    fn test_domain_wide_errors_not_metric_scoped() {
        let err = NetStatError::NameUnavailable { cause: HypervisorError::new("lost connection") };
        assert!(!err.is_scoped_to_metric());
        assert_eq!(err.reason_label(), "name_unavailable");
    }
}
