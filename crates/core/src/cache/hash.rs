//! Request cache key generation.

use crate::endpoint::{Endpoint, NewsParams};
use sha2::{Digest, Sha256};

/// Compute the cache key for an upstream request.
///
/// The key is a SHA-256 hash of the JSON encoding of the endpoint and the
/// key-sorted parameters, so parameter insertion order never matters and
/// values cannot smuggle in extra parameters.
pub fn cache_key(endpoint: Endpoint, params: &NewsParams) -> String {
    let request = serde_json::json!({
        "endpoint": endpoint.as_str(),
        "params": params,
    });

    let mut hasher = Sha256::new();
    hasher.update(request.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
