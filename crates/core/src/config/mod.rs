//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (TECHTRENDS_*)
//! 2. TOML config file (if TECHTRENDS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Fallback environment variable for the NewsAPI key.
const LEGACY_API_KEY_VAR: &str = "NEWSAPI_KEY";

/// Deployment mode. Controls whether internal error details reach HTTP callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (TECHTRENDS_*)
/// 2. TOML config file (if TECHTRENDS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// NewsAPI key attached to outbound requests.
    ///
    /// Set via TECHTRENDS_NEWS_API_KEY, or NEWSAPI_KEY as a fallback.
    /// Required only by the proxy and by direct-mode clients.
    #[serde(default)]
    pub news_api_key: Option<String>,

    /// Base URL of the upstream news API.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Timeout for the proxy's outbound call in milliseconds.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Client response cache TTL in seconds.
    #[serde(default = "default_client_cache_ttl_secs")]
    pub client_cache_ttl_secs: u64,

    /// Proxy response cache TTL in seconds.
    #[serde(default = "default_proxy_cache_ttl_secs")]
    pub proxy_cache_ttl_secs: u64,

    /// User-Agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub environment: Environment,

    /// Accept `GET /api/proxy?endpoint=...` in addition to POST.
    #[serde(default)]
    pub permissive_methods: bool,

    /// Listen address for the proxy server.
    #[serde(default = "default_proxy_addr")]
    pub proxy_addr: SocketAddr,

    /// Listen address for the demo/static server.
    #[serde(default = "default_demo_addr")]
    pub demo_addr: SocketAddr,

    /// Directory of static assets served by the demo server.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_upstream_base_url() -> String {
    "https://newsapi.org/v2".into()
}

fn default_upstream_timeout_ms() -> u64 {
    5_000
}

fn default_client_cache_ttl_secs() -> u64 {
    15 * 60
}

fn default_proxy_cache_ttl_secs() -> u64 {
    5 * 60
}

fn default_user_agent() -> String {
    "techtrends/0.1".into()
}

fn default_proxy_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_demo_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3001))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            upstream_base_url: default_upstream_base_url(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            client_cache_ttl_secs: default_client_cache_ttl_secs(),
            proxy_cache_ttl_secs: default_proxy_cache_ttl_secs(),
            user_agent: default_user_agent(),
            environment: Environment::Development,
            permissive_methods: false,
            proxy_addr: default_proxy_addr(),
            demo_addr: default_demo_addr(),
            static_dir: default_static_dir(),
        }
    }
}

impl AppConfig {
    /// Upstream timeout as Duration for use with reqwest.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn client_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.client_cache_ttl_secs)
    }

    pub fn proxy_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.proxy_cache_ttl_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `TECHTRENDS_`
    /// 2. TOML file from `TECHTRENDS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// `NEWSAPI_KEY` fills `news_api_key` when no other source sets it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("TECHTRENDS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("TECHTRENDS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        if config.news_api_key.is_none()
            && let Ok(key) = std::env::var(LEGACY_API_KEY_VAR)
            && !key.is_empty()
        {
            config.news_api_key = Some(key);
        }

        config.validate()?;

        Ok(config)
    }

    /// Return the NewsAPI key, or an error naming how to set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_news_api_key(&self) -> Result<&str, ConfigError> {
        self.news_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "news_api_key".into(),
                hint: "Set TECHTRENDS_NEWS_API_KEY or NEWSAPI_KEY environment variable".into(),
            })
    }
}
