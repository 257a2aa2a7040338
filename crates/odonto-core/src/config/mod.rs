//! Configuration with layered resolution.
//!
//! ```
//! use odonto_core::config::OdontoConfig;
//!
//! let config = OdontoConfig::from_toml("[cache]\nttl_secs = 60").unwrap();
//! assert_eq!(config.cache.ttl_secs, 60);
//! assert_eq!(config.server.default_page_size, 100);
//! ```

pub mod auth_config;
pub mod cache_config;
pub mod defaults;
pub mod observability_config;
pub mod server_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use auth_config::{AuthConfig, StaffToken};
pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;

use crate::constants::MAX_PAGE_SIZE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ODONTO_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OdontoConfig {
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub observability: ObservabilityConfig,
}

impl OdontoConfig {
    /// Load configuration from an optional TOML file, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var("ODONTO_DB_PATH") {
            self.storage.db_path = db_path;
        }
        if let Ok(addr) = std::env::var("ODONTO_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Ok(level) = std::env::var("ODONTO_LOG") {
            self.observability.log_level = level;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache.ttl_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.server.max_page_size == 0 || self.server.max_page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationFailed {
                field: "server.max_page_size".to_string(),
                message: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }
        if self.server.default_page_size == 0
            || self.server.default_page_size > self.server.max_page_size
        {
            return Err(ConfigError::ValidationFailed {
                field: "server.default_page_size".to_string(),
                message: "must be between 1 and server.max_page_size".to_string(),
            });
        }
        if self.storage.read_pool_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
