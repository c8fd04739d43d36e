//! HTTP product provider for the upstream catalog service

use async_trait::async_trait;
use harvest_core::config::ProviderConfig;
use harvest_core::product::{map_raw_products, RawProduct};
use harvest_core::{HarvestError, Product, ProductProvider, Result};
use std::time::Duration;

/// Path of the full catalog listing on the upstream service
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// Fetches the full catalog from `{base_url}/api/v1/products`
#[derive(Debug, Clone)]
pub struct HttpProductProvider {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpProductProvider {
    /// Create a new provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let parsed = url::Url::parse(&config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HarvestError::validation(format!(
                "Unsupported product catalog scheme: {}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            client,
        })
    }

    /// Full URL of the catalog listing
    pub fn products_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCTS_PATH)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the upstream catalog answers with 200 OK
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.products_url()).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::warn!("Product catalog health check failed: {}", e);
                false
            }
        }
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> HarvestError {
        if error.is_timeout() {
            HarvestError::timeout(format!(
                "GET {} exceeded {}s",
                url,
                self.timeout.as_secs()
            ))
        } else {
            HarvestError::network(format!("Failed to reach product catalog at {}: {}", url, error))
        }
    }
}

#[async_trait]
impl ProductProvider for HttpProductProvider {
    async fn get_all_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        tracing::debug!(url = %url, "Requesting product catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Product catalog responded");

        if status != reqwest::StatusCode::OK {
            return Err(HarvestError::provider(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let raw: Vec<RawProduct> = serde_json::from_slice(&body).map_err(|e| {
            HarvestError::parse(format!("Failed to decode product catalog: {}", e))
        })?;

        map_raw_products(raw)
    }
}
