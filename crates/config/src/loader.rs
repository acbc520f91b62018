//! Configuration loading from multiple sources

use crate::{CheckoutConfig, ConfigError, Result};
use config::{Config, Environment};
use std::path::Path;

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML, YAML, and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<CheckoutConfig> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;

        match extension {
            "toml" => Self::from_toml(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}",
                extension
            ))),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<CheckoutConfig> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(content: &str) -> Result<CheckoutConfig> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<CheckoutConfig> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from environment variables
    ///
    /// Uses default prefix "CHECKOUT"
    pub fn from_env() -> Result<CheckoutConfig> {
        Self::from_env_with_prefix("CHECKOUT")
    }

    /// Load configuration from environment variables with custom prefix
    ///
    /// Environment variables should be in the format: PREFIX_SECTION_KEY
    /// For example: CHECKOUT_LOG_LEVEL=debug
    pub fn from_env_with_prefix(prefix: &str) -> Result<CheckoutConfig> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).separator("_"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    /// Merge two configurations, with overlay taking precedence
    pub fn merge(_base: CheckoutConfig, overlay: CheckoutConfig) -> CheckoutConfig {
        CheckoutConfig {
            order: overlay.order,
            cart: overlay.cart,
            log_level: overlay.log_level,
        }
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// 1. Loads base configuration from file
    /// 2. Overlays environment variables with the given prefix
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<CheckoutConfig> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => config::FileFormat::Toml,
            Some("yaml") | Some("yml") => config::FileFormat::Yaml,
            Some("json") => config::FileFormat::Json,
            other => {
                return Err(ConfigError::LoadError(format!(
                    "Unsupported file extension: {:?}",
                    other
                )))
            }
        };

        let config = Config::builder()
            .add_source(config::File::from(path).format(format))
            .add_source(Environment::with_prefix(env_prefix).separator("_"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }
}
