//! Centralized path configuration for virtnet.
//!
//! Defaults match a stock libvirt/QEMU install on Linux.

use std::path::PathBuf;

/// Where libvirt's QEMU driver keeps live domain status files.
pub const DEFAULT_LIBVIRT_RUN_DIR: &str = "/run/libvirt/qemu";

/// Kernel network device tree.
pub const DEFAULT_SYSFS_NET_DIR: &str = "/sys/class/net";

/// Get the virtnet configuration directory.
///
/// Resolution order:
/// 1. `VIRTNET_CONFIG_DIR` environment variable
/// 2. `/etc/virtnet` if it exists (system install)
/// 3. `<user config dir>/virtnet`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VIRTNET_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    let system_dir = PathBuf::from("/etc/virtnet");
    if system_dir.exists() {
        return system_dir;
    }

    dirs::config_dir().map(|c| c.join("virtnet")).unwrap_or(system_dir)
}

/// Get the configuration file path.
///
/// `VIRTNET_CONFIG` names the file directly and wins over the directory lookup.
pub fn config_file() -> PathBuf {
    if let Ok(file) = std::env::var("VIRTNET_CONFIG") {
        return PathBuf::from(file);
    }
    config_dir().join("config.json")
}

/// Live status file for a domain under `run_dir`.
pub fn domain_status_path(run_dir: &str, domain: &str) -> PathBuf {
    PathBuf::from(run_dir).join(format!("{}.xml", domain))
}

/// Directory holding the kernel counters of one interface.
pub fn interface_statistics_dir(sysfs_net_dir: &str, interface: &str) -> PathBuf {
    PathBuf::from(sysfs_net_dir).join(interface).join("statistics")
}
