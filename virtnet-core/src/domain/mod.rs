//! Hypervisor domain abstraction.
//!
//! virtnet never opens, closes or pools hypervisor connections. Callers hand
//! in something implementing `DomainHandle` and keep owning it:
//! - libvirt bindings: wrap the binding's domain object
//! - `host::HostDomain`: reads libvirt's status file and kernel counters directly
//! - tests: in-memory stubs

use crate::error::HypervisorError;
use crate::types::InterfaceStats;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for collaborator calls.
pub type HypervisorResult<T> = std::result::Result<T, HypervisorError>;

/// A running domain, as seen through the hypervisor connection.
///
/// Implementations must tolerate concurrent calls if callers fetch metrics
/// concurrently; virtnet adds no locking of its own.
#[async_trait]
pub trait DomainHandle: Send + Sync {
    /// Full XML configuration description of the domain.
    async fn xml_desc(&self) -> HypervisorResult<String>;

    /// Domain name.
    async fn name(&self) -> HypervisorResult<String>;

    /// All eight counters of one interface, in a single round-trip.
    async fn interface_stats(&self, interface: &str) -> HypervisorResult<InterfaceStats>;
}

#[async_trait]
impl<T: DomainHandle + ?Sized> DomainHandle for Arc<T> {
    async fn xml_desc(&self) -> HypervisorResult<String> {
        (**self).xml_desc().await
    }

    async fn name(&self) -> HypervisorResult<String> {
        (**self).name().await
    }

    async fn interface_stats(&self, interface: &str) -> HypervisorResult<InterfaceStats> {
        (**self).interface_stats(interface).await
    }
}

pub mod host;

pub use host::HostDomain;
