//! Host-backed domain: libvirt status files plus kernel interface counters.
//!
//! Works on any Linux host running libvirt's QEMU driver without linking
//! against libvirt. Guest NICs are host tap devices, so their counters live in
//! sysfs.

use super::{DomainHandle, HypervisorResult};
use crate::config::Config;
use crate::error::HypervisorError;
use crate::paths;
use crate::types::InterfaceStats;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// sysfs counter file names, in `InterfaceStats` field order.
const COUNTER_FILES: [&str; 8] = [
    "rx_bytes",
    "rx_packets",
    "rx_errors",
    "rx_dropped",
    "tx_bytes",
    "tx_packets",
    "tx_errors",
    "tx_dropped",
];

/// A running libvirt domain observed from the host.
#[derive(Debug, Clone)]
pub struct HostDomain {
    name: String,
    xml_path: PathBuf,
    sysfs_net_dir: String,
    swap_tap_counters: bool,
}

impl HostDomain {
    /// Domain whose description is libvirt's live status file.
    pub fn new(name: impl Into<String>, config: &Config) -> Self {
        let name = name.into();
        let xml_path = paths::domain_status_path(&config.libvirt_run_dir, &name);
        Self::with_xml_path(name, xml_path, config)
    }

    /// Domain whose description is read from `xml_path`, e.g. saved
    /// `virsh dumpxml` output.
    pub fn with_xml_path(
        name: impl Into<String>,
        xml_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            name: name.into(),
            xml_path: xml_path.into(),
            sysfs_net_dir: config.sysfs_net_dir.clone(),
            swap_tap_counters: config.swap_tap_counters,
        }
    }

    pub fn xml_path(&self) -> &Path {
        &self.xml_path
    }

    fn statistics_dir(&self, interface: &str) -> HypervisorResult<PathBuf> {
        if interface.is_empty() || interface == "." || interface == ".." || interface.contains('/')
        {
            return Err(HypervisorError::new(format!("invalid interface name '{}'", interface)));
        }
        Ok(paths::interface_statistics_dir(&self.sysfs_net_dir, interface))
    }
}

async fn read_counter(dir: &Path, file: &str) -> HypervisorResult<u64> {
    let path = dir.join(file);
    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
        HypervisorError::new(format!("failed to read {}: {}", path.display(), e))
    })?;
    raw.trim().parse::<u64>().map_err(|e| {
        HypervisorError::new(format!("invalid counter in {}: {}", path.display(), e))
    })
}

#[async_trait]
impl DomainHandle for HostDomain {
    #[instrument(skip(self), fields(domain = %self.name, path = %self.xml_path.display()))]
    async fn xml_desc(&self) -> HypervisorResult<String> {
        tokio::fs::read_to_string(&self.xml_path).await.map_err(|e| {
            HypervisorError::new(format!(
                "failed to read domain description {}: {}",
                self.xml_path.display(),
                e
            ))
        })
    }

    async fn name(&self) -> HypervisorResult<String> {
        Ok(self.name.clone())
    }

    #[instrument(skip(self), fields(domain = %self.name))]
    async fn interface_stats(&self, interface: &str) -> HypervisorResult<InterfaceStats> {
        let dir = self.statistics_dir(interface)?;

        let mut counters = [0u64; 8];
        for (slot, file) in counters.iter_mut().zip(COUNTER_FILES) {
            *slot = read_counter(&dir, file).await?;
        }
        let [rx_bytes, rx_packets, rx_errs, rx_drop, tx_bytes, tx_packets, tx_errs, tx_drop] =
            counters;

        let stats = InterfaceStats {
            rx_bytes,
            rx_packets,
            rx_errs,
            rx_drop,
            tx_bytes,
            tx_packets,
            tx_errs,
            tx_drop,
        };
        debug!(dir = %dir.display(), swapped = self.swap_tap_counters, "Read interface counters");

        Ok(if self.swap_tap_counters { stats.swapped() } else { stats })
    }
}
