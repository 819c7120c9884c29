//! Proxy routes.
//!
//! `POST /api/proxy` with `{"endpoint": ..., "params": {...}}` forwards a
//! sanitized request to NewsAPI:
//!
//! - endpoint must be `top-headlines` or `everything`, else 400
//! - params are filtered against the endpoint whitelist
//! - the API key is taken from server config, never from the request
//! - successful bodies are cached for a few minutes and returned with
//!   `Cache-Control: public, max-age=300`
//!
//! With `permissive_methods` set, `GET /api/proxy?endpoint=...&<params>` is
//! accepted too; otherwise anything but POST gets 405.

pub mod forward;

pub use forward::Forwarder;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use techtrends_core::{AppConfig, Endpoint, Error, RequestCache, cache_key};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Shared-cache lifetime advertised on successful responses.
pub const CACHE_CONTROL: &str = "public, max-age=300";

/// State shared by proxy handlers.
#[derive(Clone)]
pub struct ProxyState {
    forwarder: Arc<Forwarder>,
    cache: RequestCache<Value>,
    permissive_methods: bool,
    expose_details: bool,
}

impl ProxyState {
    pub fn new(config: &AppConfig, forwarder: Forwarder, cache: RequestCache<Value>) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
            cache,
            permissive_methods: config.permissive_methods,
            expose_details: !config.is_production(),
        }
    }

    fn error(&self, err: Error) -> ApiError {
        ApiError::new(err, self.expose_details)
    }
}

/// JSON body accepted by `POST /api/proxy`.
#[derive(Debug, Deserialize)]
struct ProxyBody {
    endpoint: String,
    #[serde(default)]
    params: Map<String, Value>,
}

/// Build the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/proxy", any(proxy))
        .route("/health", get(crate::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn proxy(
    State(state): State<ProxyState>, method: Method, Query(query): Query<BTreeMap<String, String>>, body: Bytes,
) -> Result<Response, ApiError> {
    let (endpoint, raw_params) = match method {
        Method::POST => parse_body(&body).map_err(|e| state.error(e))?,
        Method::GET if state.permissive_methods => parse_query(query).map_err(|e| state.error(e))?,
        other => {
            tracing::debug!("rejecting {} /api/proxy", other);
            return Err(state.error(Error::MethodNotAllowed("Method not allowed".into())));
        }
    };

    let endpoint: Endpoint = endpoint.parse().map_err(|e| state.error(e))?;
    let params = endpoint.sanitize(&raw_params);
    let key = cache_key(endpoint, &params);

    if let Some(cached) = state.cache.get(&key).await {
        tracing::debug!("proxy cache hit for {}", endpoint);
        return Ok(success(cached));
    }

    let body = state
        .forwarder
        .forward(endpoint, &params)
        .await
        .map_err(|e| state.error(e))?;

    state.cache.set(key, body.clone()).await;

    Ok(success(body))
}

fn success(body: Value) -> Response {
    ([(header::CACHE_CONTROL, CACHE_CONTROL)], Json(body)).into_response()
}

fn parse_body(body: &[u8]) -> Result<(String, Map<String, Value>), Error> {
    let parsed: ProxyBody = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("unparseable proxy body: {}", e);
        Error::Validation("Invalid request body".into())
    })?;
    Ok((parsed.endpoint, parsed.params))
}

fn parse_query(mut query: BTreeMap<String, String>) -> Result<(String, Map<String, Value>), Error> {
    let endpoint = query
        .remove("endpoint")
        .ok_or_else(|| Error::Validation("Missing endpoint parameter".into()))?;
    let params = query.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    Ok((endpoint, params))
}
