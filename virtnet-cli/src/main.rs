use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use virtnet_core::{Config, HostDomain};

mod commands;

#[derive(Parser)]
#[command(name = "virtnet")]
#[command(about = "Per-interface network statistics of libvirt domains", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $VIRTNET_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the metric namespaces a domain exposes
    List {
        /// Domain name
        domain: String,

        /// Read the domain XML from this file instead of libvirt's status file
        #[arg(long)]
        xml: Option<PathBuf>,
    },

    /// Collect live values
    Collect {
        /// Domain name
        domain: String,

        /// Namespaces or prefixes (e.g. /libvirt/vm1/net/vnet0); default: all
        namespaces: Vec<String>,

        /// Read the domain XML from this file instead of libvirt's status file
        #[arg(long)]
        xml: Option<PathBuf>,

        /// Print one JSON object per sample
        #[arg(long)]
        json: bool,
    },
}

fn open_domain(name: String, xml: Option<PathBuf>, config: &Config) -> HostDomain {
    match xml {
        Some(path) => HostDomain::with_xml_path(name, path, config),
        None => HostDomain::new(name, config),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_required(path)?,
        None => Config::load()?,
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    virtnet_core::init_observability(level);

    match cli.command {
        Commands::List { domain, xml } => {
            let domain = open_domain(domain, xml, &config);
            commands::list(&domain, &config).await?;
        }

        Commands::Collect { domain, namespaces, xml, json } => {
            let domain = open_domain(domain, xml, &config);
            commands::collect(&domain, &config, &namespaces, json).await?;
        }
    }

    Ok(())
}
