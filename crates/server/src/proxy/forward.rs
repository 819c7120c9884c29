//! Outbound calls to the upstream news API.

use reqwest::header;
use serde_json::Value;
use std::time::{Duration, Instant};
use techtrends_core::{AppConfig, Endpoint, Error, NewsParams};

/// Forwards sanitized requests to NewsAPI with the server-held key.
#[derive(Debug, Clone)]
pub struct Forwarder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl Forwarder {
    /// Build a forwarder from application config.
    ///
    /// # Errors
    ///
    /// Fails if no API key is configured or the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let api_key = config.require_news_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.upstream_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: config.upstream_timeout(),
        })
    }

    /// Issue one upstream call and return its JSON body.
    ///
    /// Non-2xx answers become `Error::Upstream` with the upstream status and
    /// message. Timeouts, network failures and unparseable bodies become
    /// `Error::Internal`.
    pub async fn forward(&self, endpoint: Endpoint, params: &NewsParams) -> Result<Value, Error> {
        let start = Instant::now();
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!("forwarding to {} with {} params", url, params.len());

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Internal(format!("upstream request timed out after {:?}", self.timeout))
                } else {
                    Error::Internal(format!("upstream request failed: {e}"))
                }
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("failed to read upstream response: {e}")))?;

        tracing::debug!("upstream answered {} in {:?}", status, start.elapsed());

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("Upstream request failed with status {}", status.as_u16()));
            return Err(Error::Upstream { status: status.as_u16(), message });
        }

        serde_json::from_slice(&bytes).map_err(|e| Error::Internal(format!("malformed upstream response: {e}")))
    }
}
