//! Integration tests for observability infrastructure.
//!
//! These tests validate that tracing and self-metrics work end-to-end while
//! statistics are being collected. No exporter or collector is needed: the
//! `metrics` facade is a no-op without a recorder, and tracing falls back to
//! whatever subscriber the test binary has.
//!
//! Run with output to see tracing logs:
//! ```bash
//! cargo test --test observability_integration -- --nocapture
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;
use virtnet_core::domain::HypervisorResult;
use virtnet_core::observability::metrics::*;
use virtnet_core::{
    DomainHandle, HypervisorError, InterfaceStats, MetricNamespace, NetPlugin, StatisticKind,
};

struct FlakyDomain;

#[async_trait]
impl DomainHandle for FlakyDomain {
    async fn xml_desc(&self) -> HypervisorResult<String> {
        Ok("<domain><devices>\
            <interface><target dev='vnet0'/></interface>\
            <interface><target dev='vnet1'/></interface>\
            </devices></domain>"
            .to_string())
    }

    async fn name(&self) -> HypervisorResult<String> {
        Ok("flaky".to_string())
    }

    async fn interface_stats(&self, interface: &str) -> HypervisorResult<InterfaceStats> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        if interface == "vnet0" {
            Ok(InterfaceStats { rx_bytes: 1, ..Default::default() })
        } else {
            Err(HypervisorError::new("flaky"))
        }
    }
}

/// Test that subscriber installation is idempotent.
///
/// Validates:
/// - A second initialization does not panic
/// - A second initialization reports that a subscriber already exists
#[tokio::test]
async fn test_init_twice_is_harmless() {
    virtnet_core::init_observability("debug");
    assert!(!virtnet_core::init_observability("info"));

    tracing::info!(domain = "vm1", interface = "vnet0", "Observability ready");
}

/// Test metric helper functions.
///
/// Validates:
/// - Registration can be repeated
/// - Every helper accepts every statistic kind
#[tokio::test]
async fn test_metric_helpers() {
    register_core_metrics();
    register_core_metrics();

    for kind in StatisticKind::ALL {
        record_fetch(kind);
        record_fetch_failure(Some(kind), "hypervisor_query_failed");
    }
    record_fetch_failure(None, "unrecognized_statistic");
    record_fetch_duration(0.002);
    record_catalog("vm1", 16);
    record_catalog_failure();
}

/// Test metrics and spans under concurrent collection.
///
/// Validates:
/// - Recording from many tasks at once is safe
/// - Failures in one interface are recorded while the other succeeds
#[tokio::test]
async fn test_concurrent_collection_with_failures() {
    register_core_metrics();

    let mut handles = vec![];
    for i in 0..8 {
        let span = tracing::info_span!("collector", task_id = i);
        let handle = tokio::spawn(
            async move {
                let plugin = NetPlugin::default();
                let catalog = plugin.list_metric_types(&FlakyDomain).await.expect("catalog");
                let results = plugin.collect_metrics(&FlakyDomain, &catalog).await;
                results.iter().filter(|r| r.is_ok()).count()
            }
            .instrument(span),
        );
        handles.push(handle);
    }

    for handle in handles {
        let ok = handle.await.expect("Task should complete successfully");
        assert_eq!(ok, StatisticKind::ALL.len());
    }
}

/// Test that instrumented calls can be traced with failures.
///
/// Validates:
/// - Errors surface through `#[instrument(err)]` wrappers unchanged
#[tokio::test]
async fn test_tracing_instrumentation() {
    #[tracing::instrument(err, skip(plugin))]
    async fn collect_one(plugin: &NetPlugin, interface: &str) -> virtnet_core::Result<u64> {
        let ns = MetricNamespace::for_metric("flaky", interface, StatisticKind::RxBytes);
        Ok(plugin.collect_metric(&FlakyDomain, &ns).await?.value)
    }

    let plugin = NetPlugin::default();
    assert_eq!(collect_one(&plugin, "vnet0").await.unwrap(), 1);
    assert!(collect_one(&plugin, "vnet1").await.is_err());
}
