//! Live counter retrieval for one resolved metric.

use crate::domain::DomainHandle;
use crate::error::{HypervisorError, NetStatError, Result};
use crate::observability::metrics as obs;
use crate::types::{InterfaceStats, MetricNamespace, MetricSample};
use std::time::{Instant, SystemTime};
use tracing::{debug, instrument, warn};

use super::matcher::{resolve, MetricTarget};

/// Fetch the live value `namespace` names.
///
/// One statistics round-trip per call. The timestamp is taken after the
/// hypervisor answered. Counters are passed through untouched.
#[instrument(skip(domain, namespace), fields(namespace = %namespace))]
pub async fn fetch_stat<D>(domain: &D, namespace: &MetricNamespace) -> Result<MetricSample>
where
    D: DomainHandle + ?Sized,
{
    let target = match resolve(namespace) {
        Ok(target) => target,
        Err(e) => {
            obs::record_fetch_failure(None, e.reason_label());
            return Err(e);
        }
    };

    let (stats, read_at) = query_interface(domain, namespace, target).await?;
    Ok(package(namespace, target, &stats, read_at))
}

/// One `interface_stats` round-trip, with failures attributed to
/// (domain, interface).
pub(crate) async fn query_interface<D>(
    domain: &D,
    namespace: &MetricNamespace,
    target: MetricTarget<'_>,
) -> Result<(InterfaceStats, SystemTime)>
where
    D: DomainHandle + ?Sized,
{
    query_bundle(domain, target.interface)
        .await
        .map_err(|cause| attribute_failure(namespace, target, cause))
}

/// Timed raw round-trip, failure left unattributed.
///
/// On success the bundle comes with the wall-clock time it was read at.
pub(crate) async fn query_bundle<D>(
    domain: &D,
    interface: &str,
) -> std::result::Result<(InterfaceStats, SystemTime), HypervisorError>
where
    D: DomainHandle + ?Sized,
{
    let started = Instant::now();
    let result = domain.interface_stats(interface).await;
    let read_at = SystemTime::now();
    obs::record_fetch_duration(started.elapsed().as_secs_f64());
    result.map(|stats| (stats, read_at))
}

/// Turn a collaborator failure into the error of one specific metric.
pub(crate) fn attribute_failure(
    namespace: &MetricNamespace,
    target: MetricTarget<'_>,
    cause: HypervisorError,
) -> NetStatError {
    let err = query_failed(namespace, target.interface, cause);
    warn!(interface = target.interface, kind = %target.kind, error = %err, "Interface statistics query failed");
    obs::record_fetch_failure(Some(target.kind), err.reason_label());
    err
}

/// Wrap the selected counter into a sample stamped with its read time.
pub(crate) fn package(
    namespace: &MetricNamespace,
    target: MetricTarget<'_>,
    stats: &InterfaceStats,
    read_at: SystemTime,
) -> MetricSample {
    let value = stats.get(target.kind);
    debug!(interface = target.interface, kind = %target.kind, value, "Collected interface statistic");
    obs::record_fetch(target.kind);

    MetricSample { namespace: namespace.clone(), value, timestamp: read_at }
}

pub(crate) fn query_failed(
    namespace: &MetricNamespace,
    interface: &str,
    cause: HypervisorError,
) -> NetStatError {
    NetStatError::HypervisorQueryFailed {
        // Segment 1 always carries the domain name in a resolved namespace.
        domain: namespace.segment(1).unwrap_or_default().to_string(),
        interface: interface.to_string(),
        cause,
    }
}
