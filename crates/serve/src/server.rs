//! Server module for Harvest serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::middleware::{logging_middleware, request_id_middleware};
use crate::ServerConfig;
use axum::{http::Method, middleware::from_fn, Router};
use harvest_core::{HarvestError, Result};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Harvest HTTP server
pub struct HarvestServer {
    config: ServerConfig,
    app: Router,
}

impl HarvestServer {
    /// Create a server that queries the configured upstream catalog
    pub fn new(config: ServerConfig) -> Result<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around an already wired application state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = create_app(&config, state);
        Self { config, app }
    }

    /// Start the server and run until ctrl-c
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| HarvestError::validation(format!("Invalid address {}: {}", addr, e)))?;

        tracing::info!("Starting Harvest server on {}", addr);

        let listener = tokio::net::TcpListener::bind(socket_addr)
            .await
            .map_err(|e| HarvestError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| HarvestError::network(format!("Server error: {}", e)))?;

        tracing::info!("Harvest server stopped");
        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the Axum application with middleware
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = create_routes()
        .with_state(state)
        .layer(from_fn(logging_middleware))
        .layer(from_fn(request_id_middleware));

    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    if config.cors_enabled {
        app = app.layer(cors_layer());
    }

    app
}

/// Any origin may issue read-only requests
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the upstream catalog base URL
    pub fn provider_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.provider_url = url.into();
        self
    }

    /// Build a server backed by the upstream catalog
    pub fn build(self) -> Result<HarvestServer> {
        HarvestServer::new(self.config)
    }

    /// Build a server around the given state
    pub fn build_with_state(self, state: AppState) -> HarvestServer {
        HarvestServer::with_state(self.config, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use harvest_core::InMemoryProductProvider;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn empty_state() -> AppState {
        AppState::new(Arc::new(InMemoryProductProvider::default()))
    }

    async fn get_health(app: Router) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_server_builder() {
        let server = ServerBuilder::from_config(ServerConfig::default())
            .host("127.0.0.1")
            .port(8080)
            .provider_url("http://catalog:5000")
            .build()
            .unwrap();

        assert_eq!(server.config().host, "127.0.0.1");
        assert_eq!(server.config().port, 8080);
        assert_eq!(server.config().provider_url, "http://catalog:5000");
    }

    #[test]
    fn test_build_rejects_invalid_provider_url() {
        let result = ServerBuilder::from_config(ServerConfig::default())
            .provider_url("not a url")
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let app = create_app(&ServerConfig::default(), empty_state());
        let response = get_health(app).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let config = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        let response = get_health(create_app(&config, empty_state())).await;

        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_app(&ServerConfig::default(), empty_state());
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
