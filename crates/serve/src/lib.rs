//! Harvest Serve Library
//!
//! Web server interface for the Harvest product search service.

use harvest_core::HarvestConfig;

pub mod api;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod query;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;
pub use server::*;

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub provider_url: String,
    pub provider_timeout_secs: u64,
    pub cors_enabled: bool,
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&HarvestConfig::default())
    }
}

impl From<&HarvestConfig> for ServerConfig {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            provider_url: config.provider.base_url.clone(),
            provider_timeout_secs: config.provider.timeout_secs,
            cors_enabled: config.server.cors_enabled,
            max_request_size: config.server.max_request_size,
        }
    }
}
