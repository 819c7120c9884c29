//! NewsAPI endpoints and their query parameter whitelists.
//!
//! Only `top-headlines` and `everything` can be reached. Parameters supplied by
//! a client are filtered against the endpoint's whitelist before anything is
//! forwarded upstream.

use crate::Error;
use crate::category::UpstreamCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Country injected into `top-headlines` requests that name no country or source.
pub const DEFAULT_COUNTRY: &str = "us";

const TOP_HEADLINES_PARAMS: &[&str] = &["country", "category", "sources", "q", "pageSize", "page"];

const EVERYTHING_PARAMS: &[&str] = &[
    "q",
    "qInTitle",
    "searchIn",
    "sources",
    "domains",
    "excludeDomains",
    "from",
    "to",
    "language",
    "sortBy",
    "pageSize",
    "page",
];

/// Upstream endpoints reachable through the client and the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    #[serde(rename = "top-headlines")]
    TopHeadlines,
    #[serde(rename = "everything")]
    Everything,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }

    /// Query parameter names NewsAPI documents for this endpoint.
    pub fn allowed_params(&self) -> &'static [&'static str] {
        match self {
            Endpoint::TopHeadlines => TOP_HEADLINES_PARAMS,
            Endpoint::Everything => EVERYTHING_PARAMS,
        }
    }

    /// Filter client-supplied parameters down to this endpoint's whitelist.
    ///
    /// Unknown keys are dropped without error. Scalar values are stringified;
    /// null, array and object values are dropped. `category` is resolved
    /// through the shared category table, and `top-headlines` gets
    /// `country=us` when neither `country` nor `sources` survives filtering.
    pub fn sanitize(&self, raw: &Map<String, Value>) -> NewsParams {
        let allowed = self.allowed_params();
        let mut params = NewsParams::new();

        for (key, value) in raw {
            if !allowed.contains(&key.as_str()) {
                tracing::debug!(endpoint = self.as_str(), key = %key, "dropping unrecognized parameter");
                continue;
            }

            let Some(value) = scalar_to_string(value) else {
                tracing::debug!(endpoint = self.as_str(), key = %key, "dropping non-scalar parameter");
                continue;
            };

            if key == "category" {
                params.insert(key, UpstreamCategory::from_label(&value));
            } else {
                params.insert(key, value);
            }
        }

        if *self == Endpoint::TopHeadlines && !params.contains_key("country") && !params.contains_key("sources") {
            params.insert("country", DEFAULT_COUNTRY);
        }

        params
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-headlines" => Ok(Endpoint::TopHeadlines),
            "everything" => Ok(Endpoint::Everything),
            other => Err(Error::Validation(format!("endpoint not allowed: {other}"))),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Ordered query parameters for an upstream call.
///
/// Ordering is by key so that serialization, and therefore cache keys, are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsParams(BTreeMap<String, String>);

impl NewsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_parse_allowed_endpoints() {
        assert_eq!("top-headlines".parse::<Endpoint>().unwrap(), Endpoint::TopHeadlines);
        assert_eq!("everything".parse::<Endpoint>().unwrap(), Endpoint::Everything);
    }

    #[test]
    fn test_parse_rejects_unknown_endpoint() {
        let result = "delete-everything".parse::<Endpoint>();
        assert!(matches!(result, Err(Error::Validation(msg)) if msg.contains("delete-everything")));
        assert!("sources".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_sanitize_drops_unknown_keys_and_injects_country() {
        let raw = object(json!({"category": "technology", "evil": "1"}));
        let params = Endpoint::TopHeadlines.sanitize(&raw);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("category"), Some("technology"));
        assert_eq!(params.get("country"), Some("us"));
        assert_eq!(params.get("evil"), None);
    }

    #[test]
    fn test_sanitize_keeps_explicit_country() {
        let raw = object(json!({"country": "gb"}));
        let params = Endpoint::TopHeadlines.sanitize(&raw);
        assert_eq!(params.get("country"), Some("gb"));
    }

    #[test]
    fn test_sanitize_no_country_with_sources() {
        let raw = object(json!({"sources": "bbc-news"}));
        let params = Endpoint::TopHeadlines.sanitize(&raw);
        assert_eq!(params.get("country"), None);
        assert_eq!(params.get("sources"), Some("bbc-news"));
    }

    #[test]
    fn test_sanitize_everything_never_injects_country() {
        let raw = object(json!({"q": "rust", "country": "us", "sortBy": "publishedAt"}));
        let params = Endpoint::Everything.sanitize(&raw);
        assert_eq!(params.get("country"), None);
        assert_eq!(params.get("q"), Some("rust"));
        assert_eq!(params.get("sortBy"), Some("publishedAt"));
    }

    #[test]
    fn test_sanitize_stringifies_scalars() {
        let raw = object(json!({"pageSize": 3, "page": 1, "q": null, "sources": ["a", "b"]}));
        let params = Endpoint::TopHeadlines.sanitize(&raw);
        assert_eq!(params.get("pageSize"), Some("3"));
        assert_eq!(params.get("page"), Some("1"));
        assert!(!params.contains_key("q"));
        assert!(!params.contains_key("sources"));
    }

    #[test]
    fn test_sanitize_maps_category_labels() {
        let raw = object(json!({"category": "Programming"}));
        let params = Endpoint::TopHeadlines.sanitize(&raw);
        assert_eq!(params.get("category"), Some("technology"));
    }

    #[test]
    fn test_params_serialize_sorted() {
        let params = NewsParams::new().with("pageSize", 10).with("category", "technology").with("country", "us");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"category":"technology","country":"us","pageSize":"10"}"#);
    }
}
