//! Counter bundles and timestamped samples.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::namespace::{MetricNamespace, StatisticKind};

/// Counters of one virtual interface, as reported by the hypervisor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStats {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errs: u64,
    pub rx_drop: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errs: u64,
    pub tx_drop: u64,
}

impl InterfaceStats {
    /// Select the counter for `kind`.
    pub fn get(&self, kind: StatisticKind) -> u64 {
        match kind {
            StatisticKind::RxBytes => self.rx_bytes,
            StatisticKind::RxPackets => self.rx_packets,
            StatisticKind::RxErrs => self.rx_errs,
            StatisticKind::RxDrop => self.rx_drop,
            StatisticKind::TxBytes => self.tx_bytes,
            StatisticKind::TxPackets => self.tx_packets,
            StatisticKind::TxErrs => self.tx_errs,
            StatisticKind::TxDrop => self.tx_drop,
        }
    }

    /// Exchange the receive and transmit halves.
    ///
    /// Host tap devices count traffic from the host's side, which is the
    /// mirror image of what the guest sees.
    pub fn swapped(self) -> Self {
        Self {
            rx_bytes: self.tx_bytes,
            rx_packets: self.tx_packets,
            rx_errs: self.tx_errs,
            rx_drop: self.tx_drop,
            tx_bytes: self.rx_bytes,
            tx_packets: self.rx_packets,
            tx_errs: self.rx_errs,
            tx_drop: self.rx_drop,
        }
    }
}

/// One captured counter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    pub namespace: MetricNamespace,

    /// Raw counter, passed through unchanged
    pub value: u64,

    /// When the counter was read
    pub timestamp: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct() -> InterfaceStats {
        InterfaceStats {
            rx_bytes: 1,
            rx_packets: 2,
            rx_errs: 3,
            rx_drop: 4,
            tx_bytes: 5,
            tx_packets: 6,
            tx_errs: 7,
            tx_drop: 8,
        }
    }

    #[test]
    fn test_each_kind_selects_its_own_field() {
        let stats = distinct();
        let values: Vec<u64> = StatisticKind::ALL.iter().map(|k| stats.get(*k)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_txdrop_reads_transmit_drops() {
        // Transmit drops must never be answered with the receive drop counter.
        let stats = distinct();
        assert_eq!(stats.get(StatisticKind::TxDrop), 8);
        assert_ne!(stats.get(StatisticKind::TxDrop), stats.rx_drop);
    }

    #[test]
    fn test_swapped_mirrors_directions() {
        let swapped = distinct().swapped();
        assert_eq!(swapped.rx_bytes, 5);
        assert_eq!(swapped.tx_drop, 4);
        assert_eq!(swapped.swapped(), distinct());
    }
}
