//! Error handling for Harvest core library

use std::fmt;
use thiserror::Error;

/// Result type alias for Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Main error type for Harvest operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),

    /// The upstream catalog answered with a non-success status
    #[error("Error fetching products: upstream returned status {status}")]
    Provider { status: u16 },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Timeout errors
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    /// An upstream record could not be mapped into a product
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl HarvestError {
    /// Create a provider error carrying the upstream status code
    pub fn provider(status: u16) -> Self {
        Self::Provider { status }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Upstream status code, if this error came from a non-success response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if error is retryable.
    ///
    /// Nothing inside the service retries; this only informs callers and logs.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } | Self::Http(_) => true,
            Self::Provider { status } => *status >= 500,
            _ => false,
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Network { .. } => ErrorCategory::Network,
            Self::Provider { .. } => ErrorCategory::Upstream,
            Self::Json(_) | Self::Yaml(_) | Self::Parse { .. } => ErrorCategory::Serialization,
            Self::Config(_) | Self::Url(_) => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Generic(_) => ErrorCategory::Generic,
        }
    }
}

/// Error categories for metrics and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Serialization,
    Configuration,
    FileSystem,
    Timeout,
    Validation,
    Generic,
}

impl ErrorCategory {
    /// Label used for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Upstream => "upstream",
            Self::Serialization => "serialization",
            Self::Configuration => "configuration",
            Self::FileSystem => "filesystem",
            Self::Timeout => "timeout",
            Self::Validation => "validation",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
