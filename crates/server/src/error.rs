//! HTTP error responses for the techtrends servers.
//!
//! Wraps the core [`Error`] and renders it as a JSON body with the matching
//! status code. Internal failure details are only exposed outside production.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use techtrends_core::Error;

/// Generic message returned for internal failures.
pub const INTERNAL_MESSAGE: &str = "Failed to fetch news";

/// Error returned from route handlers.
#[derive(Debug, thiserror::Error)]
#[error("{inner}")]
pub struct ApiError {
    inner: Error,
    expose_details: bool,
}

impl ApiError {
    /// Wrap an error, choosing whether internal details reach the caller.
    pub fn new(inner: Error, expose_details: bool) -> Self {
        Self { inner, expose_details }
    }
}

impl From<Error> for ApiError {
    fn from(inner: Error) -> Self {
        Self { inner, expose_details: false }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);

        let payload = match &self.inner {
            Error::Internal(details) => {
                tracing::error!("internal error: {}", details);
                if self.expose_details {
                    json!({"error": INTERNAL_MESSAGE, "details": details})
                } else {
                    json!({"error": INTERNAL_MESSAGE})
                }
            }
            Error::Upstream { status, message } => {
                tracing::warn!("upstream error {}: {}", status, message);
                json!({"error": message})
            }
            other => {
                tracing::debug!("request rejected: {}", other);
                json!({"error": other.message()})
            }
        };

        let mut response = (status, Json(payload)).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response.headers_mut().insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}
