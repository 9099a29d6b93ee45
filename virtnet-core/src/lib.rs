//! virtnet Core Library
//!
//! Per-interface network statistics of libvirt domains, exposed as
//! hierarchically namespaced metric samples (`/libvirt/<domain>/net/<iface>/<stat>`).

pub mod config;
pub mod domain;
pub mod error;
pub mod net;
pub mod observability;
pub mod paths;
pub mod plugin;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use domain::{DomainHandle, HostDomain};
pub use error::{HypervisorError, NetStatError, Result};
pub use net::{build_catalog, fetch_stat, list_interfaces, resolve};
pub use observability::init as init_observability;
pub use plugin::NetPlugin;
pub use types::{InterfaceStats, MetricNamespace, MetricSample, StatisticKind};
