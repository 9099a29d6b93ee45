//! Metric catalog: every addressable namespace of a domain.

use crate::domain::DomainHandle;
use crate::error::{NetStatError, Result};
use crate::observability::metrics as obs;
use crate::types::{MetricNamespace, StatisticKind};
use tracing::{debug, instrument, warn};

use super::interfaces::{list_interfaces, parse_description};

/// Lazily cross statistic kinds with interfaces.
///
/// Kind-major, interface-minor: all interfaces for `rxbytes`, then all for
/// `rxpackets`, and so on.
pub fn catalog_entries<'a>(
    domain_name: &'a str,
    interfaces: &'a [String],
) -> impl Iterator<Item = MetricNamespace> + 'a {
    StatisticKind::ALL.into_iter().flat_map(move |kind| {
        interfaces
            .iter()
            .map(move |interface| MetricNamespace::for_metric(domain_name, interface, kind))
    })
}

/// List every metric namespace `domain` currently exposes. No values are read.
///
/// All-or-nothing: if the description or the name cannot be obtained, no
/// partial catalog is returned.
#[instrument(skip(domain))]
pub async fn build_catalog<D>(domain: &D) -> Result<Vec<MetricNamespace>>
where
    D: DomainHandle + ?Sized,
{
    let result = build(domain).await;
    if let Err(e) = &result {
        warn!(error = %e, "Failed to build metric catalog");
        obs::record_catalog_failure();
    }
    result
}

async fn build<D>(domain: &D) -> Result<Vec<MetricNamespace>>
where
    D: DomainHandle + ?Sized,
{
    let xml = domain.xml_desc().await.map_err(|e| NetStatError::ConfigUnavailable {
        reason: format!("failed to fetch XML description: {}", e),
    })?;

    let interfaces = {
        let doc = parse_description(&xml).map_err(|e| NetStatError::ConfigUnavailable {
            reason: format!("failed to parse XML description: {}", e),
        })?;
        list_interfaces(&doc)
    };

    let name = domain.name().await.map_err(|cause| NetStatError::NameUnavailable { cause })?;

    debug!(domain = %name, interfaces = ?interfaces, "Enumerated domain interfaces");

    let catalog: Vec<MetricNamespace> = catalog_entries(&name, &interfaces).collect();
    obs::record_catalog(&name, catalog.len());

    Ok(catalog)
}
