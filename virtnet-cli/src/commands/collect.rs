//! `virtnet collect` command

use anyhow::{bail, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use virtnet_core::{Config, DomainHandle, MetricNamespace, MetricSample, NetPlugin};

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "VALUE")]
    value: u64,
    #[tabled(rename = "TIMESTAMP")]
    timestamp: String,
}

fn rfc3339(sample: &MetricSample) -> String {
    DateTime::<Utc>::from(sample.timestamp).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Work out which namespaces to collect.
///
/// Full namespaces are used as given; shorter ones select every catalog
/// entry under them. No arguments means the whole catalog.
async fn requested<D: DomainHandle + ?Sized>(
    plugin: &NetPlugin,
    domain: &D,
    args: &[String],
) -> Result<Vec<MetricNamespace>> {
    let parsed = args
        .iter()
        .map(|a| a.parse::<MetricNamespace>())
        .collect::<virtnet_core::Result<Vec<_>>>()?;

    Ok(plugin.select_metrics(domain, &parsed).await?)
}

/// Collect and print live values
pub async fn collect<D: DomainHandle + ?Sized>(
    domain: &D,
    config: &Config,
    args: &[String],
    json: bool,
) -> Result<()> {
    let plugin = NetPlugin::new(config);
    let namespaces = requested(&plugin, domain, args).await?;

    if namespaces.is_empty() {
        eprintln!("No matching metrics");
        return Ok(());
    }

    let results = plugin.collect_metrics(domain, &namespaces).await;

    let mut samples = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (namespace, result) in namespaces.iter().zip(results) {
        match result {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "✗".red().bold(), namespace, e);
            }
        }
    }

    if json {
        for sample in &samples {
            let line = serde_json::json!({
                "namespace": sample.namespace,
                "value": sample.value,
                "timestamp": rfc3339(sample),
            });
            println!("{}", line);
        }
    } else if !samples.is_empty() {
        let rows: Vec<SampleRow> = samples
            .iter()
            .map(|s| SampleRow {
                namespace: s.namespace.to_string(),
                value: s.value,
                timestamp: rfc3339(s),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::modern());
        println!("{}", table);
    }

    if failures > 0 {
        bail!("{} of {} metrics could not be collected", failures, namespaces.len());
    }

    Ok(())
}
