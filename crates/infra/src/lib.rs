//! Harvest Infrastructure Library
//!
//! Infrastructure components for the Harvest product search service: the
//! HTTP client for the upstream product catalog and logging setup.

pub mod catalog;
pub mod logger;

pub use catalog::*;
pub use logger::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
