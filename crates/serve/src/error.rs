//! HTTP error envelope

use crate::metrics::HTTP_METRICS;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use harvest_core::HarvestError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Message returned to clients when the catalog cannot be searched
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to retrieve products";

/// Error body: `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Errors surfaced by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// The search pipeline failed as a whole; no partial results are returned
    #[error(transparent)]
    Search(#[from] HarvestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Search(err) => {
                let category = err.category();
                tracing::error!(
                    error = %err,
                    category = %category,
                    upstream_status = ?err.status_code(),
                    "Product search failed"
                );
                HTTP_METRICS.record_provider_error(category.as_str());

                let body = Json(ErrorResponse {
                    error: SEARCH_FAILED_MESSAGE.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
