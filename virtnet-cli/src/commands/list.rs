//! `virtnet list` command

use anyhow::Result;
use virtnet_core::{Config, DomainHandle, NetPlugin};

/// Print every namespace the domain exposes, one per line
pub async fn list<D: DomainHandle + ?Sized>(domain: &D, config: &Config) -> Result<()> {
    let plugin = NetPlugin::new(config);
    let catalog = plugin.list_metric_types(domain).await?;

    if catalog.is_empty() {
        eprintln!("No network interfaces found");
        return Ok(());
    }

    for namespace in catalog {
        println!("{}", namespace);
    }

    Ok(())
}
