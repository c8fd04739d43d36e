//! OpenAPI documentation
//!
//! OpenAPI 3.0 specification for the product search API, served by Swagger UI
//! at `/swagger`. Only available with the `openapi` feature.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::HealthResponse;
use harvest_core::Product;

/// OpenAPI documentation for the Harvest API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Search Service API",
        version = "1.0.0",
        description = "Filtered and sorted views over the upstream product catalog",
        license(name = "MIT OR Apache-2.0"),
    ),
    paths(
        crate::handlers::search_products,
        crate::handlers::health_check,
    ),
    components(
        schemas(Product, ErrorResponse, HealthResponse)
    ),
    tags(
        (name = "product-search", description = "Product search with filters and ordering"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

/// Get OpenAPI specification as JSON string
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn get_openapi_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ApiDoc::openapi())
}

/// Get OpenAPI specification as YAML string
///
/// # Errors
///
/// Returns an error if YAML serialization fails
pub fn get_openapi_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&ApiDoc::openapi())
}
