//! HTTP handlers for Harvest serve crate

use crate::error::ApiError;
use crate::metrics::{HTTP_METRICS, METRICS_CONTENT_TYPE};
use crate::query::SearchQueryParams;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use harvest_core::{
    Product, ProductProvider, ProductSearchService, Result, SearchProductsUseCase,
};
use harvest_infra::HttpProductProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<SearchProductsUseCase>,
}

impl AppState {
    /// Wire provider, search service and use case together
    pub fn new(provider: Arc<dyn ProductProvider>) -> Self {
        let service = ProductSearchService::new(provider);
        Self {
            use_case: Arc::new(SearchProductsUseCase::new(service)),
        }
    }

    /// Application state backed by the upstream catalog over HTTP
    pub fn from_config(config: &crate::ServerConfig) -> Result<Self> {
        let provider = HttpProductProvider::new(&harvest_core::config::ProviderConfig {
            base_url: config.provider_url.clone(),
            timeout_secs: config.provider_timeout_secs,
        })?;
        tracing::info!("Product catalog: {}", provider.products_url());

        Ok(Self::new(Arc::new(provider)))
    }
}

/// Search products with combined filters and ordering
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/product-search",
    tag = "product-search",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "Filtered product list", body = [Product]),
        (status = 500, description = "Product catalog unavailable", body = crate::error::ErrorResponse),
    )
))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> std::result::Result<Json<Vec<Product>>, ApiError> {
    let request = SearchQueryParams::from_pairs(pairs).into_request();
    tracing::info!(
        criteria = request.criteria.active_count(),
        order_by = request.order_by.as_deref().unwrap_or(""),
        "Product search request"
    );

    let products = state.use_case.execute(request).await?;
    HTTP_METRICS.record_results(products.len() as u64);

    Ok(Json(products))
}

/// Liveness probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse),
    )
))]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Prometheus scrape endpoint
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        HTTP_METRICS.render(),
    )
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::{parse_iso_datetime, HarvestError, InMemoryProductProvider};

    struct DownProvider;

    #[async_trait::async_trait]
    impl ProductProvider for DownProvider {
        async fn get_all_products(&self) -> Result<Vec<Product>> {
            Err(HarvestError::provider(503))
        }
    }

    fn state() -> AppState {
        let harvest = parse_iso_datetime("2025-06-01").unwrap();
        AppState::new(Arc::new(InMemoryProductProvider::new(vec![
            Product::new(1, "Corn", 10.0, 5, harvest),
            Product::new(2, "Corn Sweet", 20.0, 3, harvest),
        ])))
    }

    #[tokio::test]
    async fn test_search_products_handler() {
        let pairs = vec![("min_price".to_string(), "15".to_string())];

        let Json(products) = search_products(State(state()), Query(pairs))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Corn Sweet");
    }

    #[tokio::test]
    async fn test_search_products_handler_propagates_failure() {
        let state = AppState::new(Arc::new(DownProvider));
        let result = search_products(State(state), Query(Vec::new())).await;
        assert!(matches!(result, Err(ApiError::Search(_))));
    }

    #[test]
    fn test_state_from_config() {
        let state = AppState::from_config(&crate::ServerConfig::default());
        assert!(state.is_ok());
    }
}
