//! Collection surface for the host metrics framework.
//!
//! The framework lists metric types once per domain and then asks for values
//! on its own schedule. `NetPlugin` keeps no per-domain state between calls.

use crate::config::Config;
use crate::domain::DomainHandle;
use crate::error::{HypervisorError, Result};
use crate::net::{self, MetricTarget};
use crate::observability::metrics as obs;
use crate::types::namespace::METRIC_DEPTH;
use crate::types::{InterfaceStats, MetricNamespace, MetricSample};
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::{debug, instrument};

/// Counter bundles read during one batch, keyed by interface.
type Bundles = HashMap<String, std::result::Result<(InterfaceStats, SystemTime), HypervisorError>>;

/// Network statistics plugin.
#[derive(Debug, Clone)]
pub struct NetPlugin {
    batch_fetch: bool,
}

impl NetPlugin {
    pub fn new(config: &Config) -> Self {
        Self { batch_fetch: config.batch_fetch }
    }

    /// Advertise every metric `domain` exposes.
    pub async fn list_metric_types<D>(&self, domain: &D) -> Result<Vec<MetricNamespace>>
    where
        D: DomainHandle + ?Sized,
    {
        net::build_catalog(domain).await
    }

    /// Collect a single metric.
    pub async fn collect_metric<D>(
        &self,
        domain: &D,
        namespace: &MetricNamespace,
    ) -> Result<MetricSample>
    where
        D: DomainHandle + ?Sized,
    {
        net::fetch_stat(domain, namespace).await
    }

    /// Collect several metrics of one domain.
    ///
    /// One result per requested namespace, in request order. A failure only
    /// ever affects the metrics that depended on it. With batch fetching, the
    /// counter bundle of each interface is read once and shared by all kinds
    /// requested for that interface, and every sample served from it carries
    /// the time the bundle was read.
    #[instrument(skip(self, domain, namespaces), fields(count = namespaces.len()))]
    pub async fn collect_metrics<D>(
        &self,
        domain: &D,
        namespaces: &[MetricNamespace],
    ) -> Vec<Result<MetricSample>>
    where
        D: DomainHandle + ?Sized,
    {
        let mut results = Vec::with_capacity(namespaces.len());

        if !self.batch_fetch {
            for namespace in namespaces {
                results.push(net::fetch_stat(domain, namespace).await);
            }
            return results;
        }

        let mut bundles = Bundles::new();

        for namespace in namespaces {
            let target = match net::resolve(namespace) {
                Ok(target) => target,
                Err(e) => {
                    obs::record_fetch_failure(None, e.reason_label());
                    results.push(Err(e));
                    continue;
                }
            };

            if !bundles.contains_key(target.interface) {
                let bundle = net::query_bundle(domain, target.interface).await;
                bundles.insert(target.interface.to_string(), bundle);
            }
            results.push(Self::from_bundle(namespace, target, &bundles));
        }

        debug!(interfaces = bundles.len(), "Batch collection finished");
        results
    }

    /// Turn requested namespaces into the metrics to collect.
    ///
    /// Full metric namespaces are kept as given. Shorter ones are prefixes and
    /// select every catalog entry under them, in catalog order. No requests
    /// selects the whole catalog. The catalog is only built when needed, and
    /// fails the selection as a whole.
    pub async fn select_metrics<D>(
        &self,
        domain: &D,
        requests: &[MetricNamespace],
    ) -> Result<Vec<MetricNamespace>>
    where
        D: DomainHandle + ?Sized,
    {
        let needs_catalog =
            requests.is_empty() || requests.iter().any(|ns| ns.len() < METRIC_DEPTH);
        if !needs_catalog {
            return Ok(requests.to_vec());
        }

        let catalog = self.list_metric_types(domain).await?;
        if requests.is_empty() {
            return Ok(catalog);
        }

        let mut wanted = Vec::new();
        for request in requests {
            if request.len() >= METRIC_DEPTH {
                wanted.push(request.clone());
                continue;
            }
            let before = wanted.len();
            wanted.extend(catalog.iter().filter(|entry| entry.starts_with(request)).cloned());
            if wanted.len() == before {
                debug!(prefix = %request, "No catalog metrics under prefix");
            }
        }
        Ok(wanted)
    }

    /// Answer one namespace from an already fetched bundle.
    fn from_bundle(
        namespace: &MetricNamespace,
        target: MetricTarget<'_>,
        bundles: &Bundles,
    ) -> Result<MetricSample> {
        match bundles.get(target.interface) {
            Some(Ok((stats, read_at))) => Ok(net::package(namespace, target, stats, *read_at)),
            Some(Err(cause)) => Err(net::attribute_failure(namespace, target, cause.clone())),
            None => Err(net::attribute_failure(
                namespace,
                target,
                HypervisorError::new("interface statistics were not fetched"),
            )),
        }
    }
}

impl Default for NetPlugin {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
