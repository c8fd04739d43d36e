//! API routes for Harvest serve crate

use crate::handlers::{self, AppState};
use axum::{routing::get, Router};

#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

/// Product search endpoint
pub const SEARCH_PATH: &str = "/api/v1/product-search";

/// Create all routes
///
/// - GET /api/v1/product-search - Filtered, sorted product list
/// - GET /health - Liveness probe
/// - GET /metrics - Prometheus metrics
/// - GET /swagger - Swagger UI (with the `openapi` feature)
pub fn create_routes() -> Router<AppState> {
    let router = Router::new()
        .route(SEARCH_PATH, get(handlers::search_products))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics));

    #[cfg(feature = "openapi")]
    let router = router
        .merge(SwaggerUi::new("/swagger").url("/swagger/openapi.json", ApiDoc::openapi()));

    router
}
