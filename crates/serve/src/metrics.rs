//! HTTP and search metrics for monitoring and observability
//!
//! Provides Prometheus metrics for request throughput and latency, result
//! volume and upstream failures. Scraped through `GET /metrics`.

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

/// Content type of the Prometheus text exposition format
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[cfg(feature = "metrics")]
/// Global HTTP metrics instance
pub static HTTP_METRICS: Lazy<HttpMetrics> =
    Lazy::new(|| HttpMetrics::new().expect("Failed to initialize HTTP metrics"));

/// HTTP metrics collector
#[cfg(feature = "metrics")]
pub struct HttpMetrics {
    /// Total number of requests by endpoint, method and status
    pub requests_total: IntCounterVec,
    /// Request duration in seconds
    pub request_duration_seconds: HistogramVec,
    /// Number of products returned by searches
    pub search_results_total: IntCounter,
    /// Failed catalog fetches by error category
    pub provider_errors_total: IntCounterVec,
}

#[cfg(feature = "metrics")]
impl HttpMetrics {
    /// Creates and registers the metrics with the default registry
    ///
    /// # Errors
    ///
    /// Returns error if metrics registration fails
    pub fn new() -> Result<Self, prometheus::Error> {
        let requests_total = register_int_counter_vec!(
            "harvest_http_requests_total",
            "Total number of HTTP requests",
            &["endpoint", "method", "status"]
        )?;

        let request_duration_seconds = register_histogram_vec!(
            "harvest_http_request_duration_seconds",
            "HTTP request duration in seconds",
            &["endpoint", "method"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
        )?;

        let search_results_total = register_int_counter!(
            "harvest_search_results_total",
            "Total number of products returned by searches"
        )?;

        let provider_errors_total = register_int_counter_vec!(
            "harvest_provider_errors_total",
            "Total product catalog fetch failures",
            &["category"]
        )?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            search_results_total,
            provider_errors_total,
        })
    }

    /// Records a completed request
    pub fn record_request(&self, endpoint: &str, method: &str, status: &str) {
        self.requests_total
            .with_label_values(&[endpoint, method, status])
            .inc();
    }

    /// Records request duration in seconds
    pub fn record_duration(&self, endpoint: &str, method: &str, duration: f64) {
        self.request_duration_seconds
            .with_label_values(&[endpoint, method])
            .observe(duration);
    }

    /// Records the number of products returned by one search
    pub fn record_results(&self, count: u64) {
        self.search_results_total.inc_by(count);
    }

    /// Records a failed catalog fetch
    pub fn record_provider_error(&self, category: &str) {
        self.provider_errors_total
            .with_label_values(&[category])
            .inc();
    }

    /// Render every registered metric in the text exposition format
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&prometheus::gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// No-op metrics implementation when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub struct HttpMetrics;

#[cfg(not(feature = "metrics"))]
pub static HTTP_METRICS: HttpMetrics = HttpMetrics;

#[cfg(not(feature = "metrics"))]
impl HttpMetrics {
    pub fn record_request(&self, _endpoint: &str, _method: &str, _status: &str) {}
    pub fn record_duration(&self, _endpoint: &str, _method: &str, _duration: f64) {}
    pub fn record_results(&self, _count: u64) {}
    pub fn record_provider_error(&self, _category: &str) {}
    pub fn render(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_render_after_recording() {
        HTTP_METRICS.record_request("/api/v1/product-search", "GET", "200");
        HTTP_METRICS.record_duration("/api/v1/product-search", "GET", 0.02);
        HTTP_METRICS.record_results(3);
        HTTP_METRICS.record_provider_error("upstream");

        let text = HTTP_METRICS.render();
        assert!(text.contains("harvest_http_requests_total"));
        assert!(text.contains("harvest_http_request_duration_seconds"));
        assert!(text.contains("harvest_search_results_total"));
        assert!(text.contains("harvest_provider_errors_total"));
    }

    #[cfg(not(feature = "metrics"))]
    #[test]
    fn test_no_op_metrics() {
        HTTP_METRICS.record_request("/api/v1/product-search", "GET", "200");
        HTTP_METRICS.record_duration("/api/v1/product-search", "GET", 0.5);
        HTTP_METRICS.record_results(10);
        HTTP_METRICS.record_provider_error("upstream");
        assert!(HTTP_METRICS.render().is_empty());
    }
}
