//! Per-interface network statistics of a domain.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  xml_desc / name   ┌──────────────────┐
//! │ DomainHandle │ ◄───────────────── │  build_catalog() │──► Vec<MetricNamespace>
//! │              │                    │  └─ interfaces   │
//! │              │  interface_stats   ├──────────────────┤
//! │              │ ◄───────────────── │  fetch_stat()    │──► MetricSample
//! └──────────────┘                    │  └─ resolve()    │
//!                                     └──────────────────┘
//! ```
//!
//! Namespaces have the form `/libvirt/<domain>/net/<interface>/<statistic>`.
//! Every function here is stateless; concurrent calls need no coordination.

mod catalog;
mod fetcher;
mod interfaces;
mod matcher;

pub use catalog::{build_catalog, catalog_entries};
pub use fetcher::fetch_stat;
pub use interfaces::{list_interfaces, parse_description};
pub use matcher::{resolve, MetricTarget};

pub(crate) use fetcher::{attribute_failure, package, query_bundle};
