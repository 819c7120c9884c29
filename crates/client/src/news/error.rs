//! News API client error types.

use std::sync::Arc;

/// Errors from the news API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Direct transport configured without a NewsAPI key.
    #[error("missing API key: TECHTRENDS_NEWS_API_KEY not set")]
    MissingApiKey,

    /// Proxy or base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Caller input rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// Upstream or proxy answered with a failure.
    #[error("request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ClientError::Timeout } else { ClientError::Network(Arc::new(err)) }
    }
}

impl From<ClientError> for techtrends_core::Error {
    fn from(err: ClientError) -> Self {
        use techtrends_core::Error;

        match err {
            ClientError::Validation(msg) => Error::Validation(msg),
            ClientError::Request { status, message } => Error::Upstream { status, message },
            other => Error::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = ClientError::Request { status: 401, message: "apiKeyInvalid".into() };
        assert_eq!(err.to_string(), "request failed (401): apiKeyInvalid");
    }

    #[test]
    fn test_into_core_error() {
        let err: techtrends_core::Error = ClientError::Validation("too short".into()).into();
        assert_eq!(err.status_code(), 400);

        let err: techtrends_core::Error = ClientError::Request { status: 429, message: "slow down".into() }.into();
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.message(), "slow down");

        let err: techtrends_core::Error = ClientError::Timeout.into();
        assert_eq!(err.status_code(), 500);
    }
}
