//! Product search pipeline
//!
//! - `service`: filter predicates and stable sorting over a product list
//! - `use_case`: sequencing of filter and optional sort for one request

pub mod service;
pub mod use_case;

pub use service::ProductSearchService;
pub use use_case::{SearchProductsUseCase, SearchRequest};
