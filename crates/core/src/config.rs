//! Configuration types for Harvest
//!
//! Configuration is layered with the `config` crate, lowest priority first:
//! built-in defaults, an optional YAML/TOML file, `HARVEST_*` environment
//! variables (`__` separates sections, e.g. `HARVEST_PROVIDER__BASE_URL`),
//! and finally the plain `PORT` / `PRODUCT_PROVIDER_URL` variables.

use crate::{HarvestError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "HARVEST";

/// Compatibility variable overriding the listening port
pub const PORT_ENV: &str = "PORT";

/// Compatibility variable overriding the upstream catalog URL
pub const PROVIDER_URL_ENV: &str = "PRODUCT_PROVIDER_URL";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HarvestConfig {
    /// Upstream catalog settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream product catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL; products are fetched from `{base_url}/api/v1/products`
    pub base_url: String,
    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub max_request_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5002,
            cors_enabled: true,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl HarvestConfig {
    /// Load configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration using `env` in place of the process environment
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let port = env.get(PORT_ENV).cloned();
        let provider_url = env.get(PROVIDER_URL_ENV).cloned();

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.into_iter().collect())),
            )
            .set_override_option("server.port", port)?
            .set_override_option("provider.base_url", provider_url)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise fail at first use
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.provider.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HarvestError::validation(format!(
                "Provider base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.provider.timeout_secs == 0 {
            return Err(HarvestError::validation(
                "Provider timeout must be greater than 0",
            ));
        }

        if self.server.port == 0 {
            return Err(HarvestError::validation("Server port must be greater than 0"));
        }

        Ok(())
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::load_with_env(None, HashMap::new()).unwrap();
        assert_eq!(config, HarvestConfig::default());
        assert_eq!(config.provider.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.server.port, 5002);
        assert_eq!(config.provider.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_structured_env_overrides() {
        let config = HarvestConfig::load_with_env(
            None,
            env(&[
                ("HARVEST_PROVIDER__BASE_URL", "http://catalog:8000"),
                ("HARVEST_SERVER__PORT", "9000"),
                ("HARVEST_LOGGING__JSON_FORMAT", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider.base_url, "http://catalog:8000");
        assert_eq!(config.server.port, 9000);
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_compatibility_env_overrides_win() {
        let config = HarvestConfig::load_with_env(
            None,
            env(&[
                ("HARVEST_SERVER__PORT", "9000"),
                ("PORT", "7000"),
                ("PRODUCT_PROVIDER_URL", "https://products.example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.provider.base_url, "https://products.example.com");
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "provider:\n  base_url: http://upstream:5000\n  timeout_secs: 3\nserver:\n  host: 127.0.0.1\n  port: 8081\n  cors_enabled: false\n  max_request_size: 2048"
        )
        .unwrap();

        let config = HarvestConfig::load_with_env(Some(file.path()), HashMap::new()).unwrap();
        assert_eq!(config.provider.base_url, "http://upstream:5000");
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.server.port, 8081);
        assert!(!config.server.cors_enabled);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = HarvestConfig::load_with_env(
            Some(Path::new("/nonexistent/harvest.yaml")),
            HashMap::new(),
        );
        assert!(matches!(result, Err(HarvestError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = HarvestConfig::default();
        config.provider.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = HarvestConfig::default();
        config.provider.base_url = "ftp://catalog".to_string();
        assert!(matches!(
            config.validate(),
            Err(HarvestError::Validation { .. })
        ));

        let mut config = HarvestConfig::default();
        config.provider.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_yaml() {
        let yaml = HarvestConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("base_url: http://127.0.0.1:5000"));
        assert!(yaml.contains("port: 5002"));
    }
}
