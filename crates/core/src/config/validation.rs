//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `upstream_base_url` is not an http(s) URL
    /// - `upstream_timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - either cache TTL is 0
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.upstream_base_url.starts_with("http://") || self.upstream_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "upstream_base_url".into(),
                reason: "must start with http:// or https://".into(),
            });
        }

        if self.upstream_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "upstream_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.upstream_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "upstream_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.client_cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "client_cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.proxy_cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "proxy_cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.is_production() && self.permissive_methods {
            tracing::warn!("permissive_methods is enabled in production; GET /api/proxy will be accepted");
        }

        Ok(())
    }
}
