//! Configuration loading
//!
//! Each setting is resolved with the following priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command-line and environment tiers are both delivered through
//! [`ConfigOverrides`] (clap merges them); this module handles the TOML
//! and default tiers.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address (all interfaces)
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default upload body limit (25 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Default store acquire timeout
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

/// Fully resolved gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_address: String,
    pub port: u16,
    /// Backing store URL (`DATABASE_URL`); `None` disables auditing
    pub database_url: Option<String>,
    /// Logical store name (`DATABASE_NAME`)
    pub database_name: Option<String>,
    pub max_upload_bytes: usize,
    pub store_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }
}

/// Values supplied on the command line or via environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub max_upload_bytes: Option<usize>,
    pub store_timeout_secs: Option<u64>,
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub max_upload_bytes: Option<usize>,
    pub store_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load a TOML file
    ///
    /// A missing file is not an error: a warning is logged and an empty
    /// configuration is returned so startup falls through to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file not found: {} (using defaults)", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl GatewayConfig {
    /// Merge overrides and TOML values onto compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            bind_address: overrides
                .bind_address
                .or(file.bind_address)
                .unwrap_or(defaults.bind_address),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            database_url: non_empty(overrides.database_url).or_else(|| non_empty(file.database_url)),
            database_name: non_empty(overrides.database_name)
                .or_else(|| non_empty(file.database_name)),
            max_upload_bytes: overrides
                .max_upload_bytes
                .or(file.max_upload_bytes)
                .unwrap_or(defaults.max_upload_bytes),
            store_timeout_secs: overrides
                .store_timeout_secs
                .or(file.store_timeout_secs)
                .unwrap_or(defaults.store_timeout_secs),
        }
    }

    /// Whether `DATABASE_URL` was supplied (value is never reported)
    pub fn database_url_set(&self) -> bool {
        self.database_url.is_some()
    }

    /// Whether `DATABASE_NAME` was supplied (value is never reported)
    pub fn database_name_set(&self) -> bool {
        self.database_name.is_some()
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::resolve(ConfigOverrides::default(), TomlConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert!(!config.database_url_set());
        assert!(!config.database_name_set());
        assert_eq!(config.listen_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_override_beats_toml() {
        let file = TomlConfig::parse("port = 9000\ndatabase_name = \"from_toml\"").unwrap();
        let overrides = ConfigOverrides {
            port: Some(7000),
            ..Default::default()
        };

        let config = GatewayConfig::resolve(overrides, file);
        assert_eq!(config.port, 7000);
        assert_eq!(config.database_name.as_deref(), Some("from_toml"));
    }

    #[test]
    fn test_empty_database_url_counts_as_unset() {
        let overrides = ConfigOverrides {
            database_url: Some("   ".to_string()),
            ..Default::default()
        };
        let config = GatewayConfig::resolve(overrides, TomlConfig::default());
        assert!(!config.database_url_set());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::parse("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
