//! News API client.
//!
//! Fetches articles either straight from NewsAPI or through the techtrends
//! proxy, then formats them for display.
//!
//! ### Specification
//!
//! - **Direct**: `GET {base_url}/{endpoint}?{params}` with the key in `X-Api-Key`.
//! - **Proxy**: `POST {proxy_url}` with `{"endpoint": ..., "params": {...}}`; the
//!   proxy holds the key.
//! - **Caching**: responses are stored in an injected [`RequestCache`] keyed by
//!   endpoint and parameters (15 minute TTL by default).
//! - **Failures**: one call per cache miss, no retries. Non-2xx answers become
//!   `ClientError::Request` carrying the upstream or proxy message.

pub mod error;
pub mod request;
pub mod response;

pub use error::ClientError;
pub use request::{ArticleQuery, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE, DEFAULT_PER_PAGE, ProxyRequest};
pub use response::{ErrorBody, NewsApiResponse};

use reqwest::{StatusCode, header};
use std::sync::Arc;
use std::time::{Duration, Instant};
use techtrends_core::cache::CLIENT_CACHE_TTL;
use techtrends_core::{AppConfig, FormattedArticle, RequestCache, cache_key};

/// Default NewsAPI base URL.
const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "techtrends/0.1";

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Call NewsAPI directly with a client-held key.
    Direct { base_url: String, api_key: String },
    /// Call the techtrends proxy, which injects the key server-side.
    Proxy { url: String },
}

/// News client configuration.
#[derive(Debug, Clone)]
pub struct NewsClientConfig {
    pub transport: Transport,
    /// Optional request timeout. Client calls have none by default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl NewsClientConfig {
    /// Direct transport against the default NewsAPI base URL.
    pub fn direct(api_key: impl Into<String>) -> Self {
        Self {
            transport: Transport::Direct { base_url: DEFAULT_BASE_URL.to_string(), api_key: api_key.into() },
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Proxy transport posting to `url` (e.g. `http://localhost:3000/api/proxy`).
    pub fn proxy(url: impl Into<String>) -> Self {
        Self {
            transport: Transport::Proxy { url: url.into() },
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Build from application config: proxy when `proxy_url` is given, else direct.
    pub fn from_app_config(config: &AppConfig, proxy_url: Option<&str>) -> Result<Self, ClientError> {
        let transport = match proxy_url {
            Some(url) => Transport::Proxy { url: url.to_string() },
            None => Transport::Direct {
                base_url: config.upstream_base_url.clone(),
                api_key: config
                    .require_news_api_key()
                    .map_err(|_| ClientError::MissingApiKey)?
                    .to_string(),
            },
        };

        Ok(Self { transport, timeout: None, user_agent: config.user_agent.clone() })
    }
}

/// News API client.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    config: NewsClientConfig,
    cache: RequestCache<NewsApiResponse>,
}

impl NewsClient {
    /// Create a client that owns the given cache.
    pub fn new(config: NewsClientConfig, cache: RequestCache<NewsApiResponse>) -> Result<Self, ClientError> {
        match &config.transport {
            Transport::Direct { api_key, base_url } => {
                if api_key.is_empty() {
                    return Err(ClientError::MissingApiKey);
                }
                url::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
            }
            Transport::Proxy { url } => {
                url::Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
            }
        }

        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Network(Arc::new(e)))?;

        Ok(Self { http, config, cache })
    }

    /// Create a client with a fresh cache using the default 15 minute TTL.
    pub fn with_default_cache(config: NewsClientConfig) -> Result<Self, ClientError> {
        Self::new(config, RequestCache::new(CLIENT_CACHE_TTL))
    }

    pub fn cache(&self) -> &RequestCache<NewsApiResponse> {
        &self.cache
    }

    pub fn config(&self) -> &NewsClientConfig {
        &self.config
    }

    /// Top technology headlines, labelled "Featured".
    pub async fn get_featured_articles(&self, limit: u32) -> Result<Vec<FormattedArticle>, ClientError> {
        self.articles(ArticleQuery::featured(limit)).await
    }

    /// Headlines for a site category, labelled with the category as given.
    pub async fn get_articles_by_category(
        &self, category: &str, page: u32, per_page: u32,
    ) -> Result<Vec<FormattedArticle>, ClientError> {
        self.articles(ArticleQuery::by_category(category, page, per_page)).await
    }

    /// Search all articles, newest first, labelled "Search".
    ///
    /// Queries shorter than three characters fail before any request is made.
    pub async fn search_articles(
        &self, query: &str, page: u32, per_page: u32,
    ) -> Result<Vec<FormattedArticle>, ClientError> {
        self.articles(ArticleQuery::search(query, page, per_page)?).await
    }

    /// Run a query and format the returned articles.
    pub async fn articles(&self, query: ArticleQuery) -> Result<Vec<FormattedArticle>, ClientError> {
        let response = self.fetch(&query).await?;
        Ok(response.formatted(&query.label))
    }

    /// Run a query, consulting the cache first.
    pub async fn fetch(&self, query: &ArticleQuery) -> Result<NewsApiResponse, ClientError> {
        let key = cache_key(query.endpoint, &query.params);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("returning cached data for {} {}", query.endpoint, key);
            return Ok(cached);
        }

        let response = self.send(query).await.inspect_err(|e| {
            tracing::warn!(endpoint = %query.endpoint, "news request failed: {}", e);
        })?;

        self.cache.set(key, response.clone()).await;
        Ok(response)
    }

    async fn send(&self, query: &ArticleQuery) -> Result<NewsApiResponse, ClientError> {
        let start = Instant::now();

        let request = match &self.config.transport {
            Transport::Direct { base_url, api_key } => {
                let url = format!("{}/{}", base_url.trim_end_matches('/'), query.endpoint);
                tracing::debug!("requesting NewsAPI directly: {}", url);
                self.http
                    .get(&url)
                    .header("X-Api-Key", api_key)
                    .header(header::ACCEPT, "application/json")
                    .query(&query.params)
            }
            Transport::Proxy { url } => {
                tracing::debug!("requesting via proxy: {} endpoint={}", url, query.endpoint);
                self.http
                    .post(url)
                    .header(header::ACCEPT, "application/json")
                    .json(&ProxyRequest { endpoint: query.endpoint, params: &query.params })
            }
        };

        let http_response = request.send().await?;
        let status = http_response.status();
        tracing::debug!("news response status: {}", status);

        let bytes = http_response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Request { status: status.as_u16(), message: failure_message(status, &bytes) });
        }

        let body: NewsApiResponse = serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))?;

        if body.is_error() {
            return Err(ClientError::Request {
                status: status.as_u16(),
                message: body.message.unwrap_or_else(|| fallback_message(status)),
            });
        }

        tracing::debug!("fetched {} articles in {:?}", body.articles.len(), start.elapsed());

        Ok(body)
    }
}

fn failure_message(status: StatusCode, bytes: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| fallback_message(status))
}

fn fallback_message(status: StatusCode) -> String {
    format!("API request failed with status {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const ARTICLES_JSON: &str = r#"{
        "status": "ok",
        "totalResults": 1,
        "articles": [{
            "source": {"id": null, "name": "Example News"},
            "author": "Sam Writer",
            "title": "GPUs get cheaper",
            "description": "Prices fall.",
            "url": "https://example.com/gpus",
            "urlToImage": "https://example.com/gpu.png",
            "publishedAt": "2025-04-02T10:00:00Z",
            "content": "Prices fall across the board"
        }]
    }"#;

    fn direct_client(base_url: String) -> NewsClient {
        let config = NewsClientConfig {
            transport: Transport::Direct { base_url, api_key: "test-key".into() },
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.into(),
        };
        NewsClient::with_default_cache(config).unwrap()
    }

    fn proxy_client(base_url: &str) -> NewsClient {
        NewsClient::with_default_cache(NewsClientConfig::proxy(format!("{base_url}/api/proxy"))).unwrap()
    }

    #[test]
    fn test_client_new_missing_key() {
        let result = NewsClient::with_default_cache(NewsClientConfig::direct(""));
        assert!(matches!(result, Err(ClientError::MissingApiKey)));
    }

    #[test]
    fn test_client_new_invalid_proxy_url() {
        let result = NewsClient::with_default_cache(NewsClientConfig::proxy("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig::default();
        assert!(matches!(NewsClientConfig::from_app_config(&app, None), Err(ClientError::MissingApiKey)));

        let config = NewsClientConfig::from_app_config(&app, Some("http://localhost:3000/api/proxy")).unwrap();
        assert_eq!(config.transport, Transport::Proxy { url: "http://localhost:3000/api/proxy".into() });

        let app = AppConfig { news_api_key: Some("k".into()), ..Default::default() };
        let config = NewsClientConfig::from_app_config(&app, None).unwrap();
        assert_eq!(
            config.transport,
            Transport::Direct { base_url: "https://newsapi.org/v2".into(), api_key: "k".into() }
        );
    }

    #[tokio::test]
    async fn test_featured_direct() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/top-headlines")
            .match_header("x-api-key", "test-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("category".into(), "technology".into()),
                Matcher::UrlEncoded("pageSize".into(), "3".into()),
                Matcher::UrlEncoded("country".into(), "us".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ARTICLES_JSON)
            .expect(1)
            .create_async()
            .await;

        let client = direct_client(server.url());
        let articles = client.get_featured_articles(3).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].category, "Featured");
        assert_eq!(articles[0].author, "Sam Writer");
        assert_eq!(articles[0].date, "April 2, 2025");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_second_identical_call_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(ARTICLES_JSON)
            .expect(1)
            .create_async()
            .await;

        let client = direct_client(server.url());
        let first = client.get_articles_by_category("AI", 1, 10).await.unwrap();
        let second = client.get_articles_by_category("AI", 1, 10).await.unwrap();

        assert_eq!(first[0].url, second[0].url);
        assert_eq!(client.cache().len().await, 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_category_label_preserved_and_mapped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("category".into(), "general".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("pageSize".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(ARTICLES_JSON)
            .create_async()
            .await;

        let client = direct_client(server.url());
        let articles = client.get_articles_by_category("all", 2, 5).await.unwrap();

        assert_eq!(articles[0].category, "all");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_too_short_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

        let client = direct_client(server.url());
        let result = client.search_articles("ai", 1, 10).await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_via_proxy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/proxy")
            .match_body(Matcher::PartialJson(json!({
                "endpoint": "everything",
                "params": {"q": "ai ml", "sortBy": "publishedAt", "language": "en"}
            })))
            .with_status(200)
            .with_body(ARTICLES_JSON)
            .expect(1)
            .create_async()
            .await;

        let client = proxy_client(&server.url());
        let articles = client.search_articles("ai ml", 1, 10).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].category, "Search");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_proxy_error_message_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/proxy")
            .with_status(400)
            .with_body(r#"{"error": "Invalid endpoint"}"#)
            .create_async()
            .await;

        let client = proxy_client(&server.url());
        let result = client.get_featured_articles(3).await;

        match result {
            Err(ClientError::Request { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid endpoint");
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_message_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#)
            .create_async()
            .await;

        let client = direct_client(server.url());
        let result = client.get_featured_articles(3).await;

        assert!(matches!(
            result,
            Err(ClientError::Request { status: 401, ref message }) if message == "Your API key is invalid."
        ));
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = direct_client(server.url());
        let result = client.search_articles("rust lang", 1, 10).await;

        assert!(matches!(
            result,
            Err(ClientError::Request { status: 503, ref message }) if message == "API request failed with status 503"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = direct_client(server.url());
        let result = client.get_featured_articles(3).await;
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }
}
