//! Search use case: filter, then sort when an order is requested

use super::service::ProductSearchService;
use crate::criteria::FilterCriteria;
use crate::product::Product;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Flattened search input as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub criteria: FilterCriteria,
    /// Field to order by; empty or absent skips the sort stage
    pub order_by: Option<String>,
    /// `desc` (any case) for descending, anything else ascending
    pub order_dir: Option<String>,
}

impl SearchRequest {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn order_by<S: Into<String>>(mut self, field: S, direction: Option<&str>) -> Self {
        self.order_by = Some(field.into());
        self.order_dir = direction.map(str::to_string);
        self
    }

    fn sort_field(&self) -> Option<&str> {
        self.order_by
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }
}

/// Orchestrates the search service for one request
#[derive(Clone)]
pub struct SearchProductsUseCase {
    service: ProductSearchService,
}

impl SearchProductsUseCase {
    pub fn new(service: ProductSearchService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, request: SearchRequest) -> Result<Vec<Product>> {
        let mut products = self.service.search(&request.criteria).await?;

        if let Some(field) = request.sort_field() {
            products =
                ProductSearchService::sort_products(products, field, request.order_dir.as_deref());
        }

        tracing::debug!(results = products.len(), "Product search executed");
        Ok(products)
    }
}
