//! Harvest Core Library
//!
//! Core functionality for the Harvest product search service: the product
//! record, filter criteria and sort specification, the provider abstraction,
//! and the search pipeline that filters and orders an in-memory catalog.

pub mod config;
pub mod criteria;
pub mod error;
pub mod product;
pub mod provider;
pub mod search;

// Re-export commonly used types
pub use config::HarvestConfig;
pub use criteria::{FilterCriteria, SortDirection, SortField};
pub use error::{ErrorCategory, HarvestError, Result};
pub use product::{parse_iso_datetime, Product, RawProduct};
pub use provider::{InMemoryProductProvider, ProductProvider};
pub use search::{ProductSearchService, SearchProductsUseCase, SearchRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
