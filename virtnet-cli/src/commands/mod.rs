//! CLI command implementations

pub mod collect;
pub mod list;

pub use collect::collect;
pub use list::list;
