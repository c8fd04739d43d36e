//! Product provider abstraction
//!
//! The search pipeline only needs one capability from the outside world:
//! fetch the whole catalog. [`ProductProvider`] captures that so the HTTP
//! implementation in `harvest-infra` and the in-memory one below are
//! interchangeable.

use crate::product::{map_raw_products, Product, RawProduct};
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Source of the full, unfiltered product list
#[async_trait]
pub trait ProductProvider: Send + Sync {
    /// Fetch every product the upstream knows about, in upstream order
    async fn get_all_products(&self) -> Result<Vec<Product>>;
}

/// Provider backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductProvider {
    products: Vec<Product>,
}

impl InMemoryProductProvider {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load products from a JSON file in the upstream catalog format
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&content)
    }

    /// Build from a JSON array in the upstream catalog format
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: Vec<RawProduct> = serde_json::from_str(content)?;
        Ok(Self::new(map_raw_products(raw)?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductProvider for InMemoryProductProvider {
    async fn get_all_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}
