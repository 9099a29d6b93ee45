//! Observability infrastructure: tracing and self-metrics.
//!
//! virtnet only records through the `tracing` and `metrics` facades. Installing
//! a metrics exporter is left to the host process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod metrics;

/// Initialize the global tracing subscriber.
///
/// `default_level` is used unless `RUST_LOG` is set. Returns `false` when a
/// subscriber was already installed (e.g. by the host process).
pub fn init(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .is_ok();

    metrics::register_core_metrics();

    if installed {
        tracing::debug!(default_level, "Observability initialized");
    }
    installed
}
