//! Unified error types for techtrends.
//!
//! Every component boundary returns `Result<_, Error>`; HTTP surfaces map the
//! variants onto status codes via [`Error::status_code`].

/// Unified error types shared by the client, proxy and demo server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Bad or missing input (query too short, disallowed endpoint, malformed body).
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),

    /// Non-2xx or malformed response from the upstream news API.
    #[error("UPSTREAM_ERROR: {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Unexpected failure (network, timeout, serialization).
    #[error("INTERNAL_ERROR: {0}")]
    Internal(String),

    /// Requested resource does not exist.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// HTTP method not accepted by the route.
    #[error("METHOD_NOT_ALLOWED: {0}")]
    MethodNotAllowed(String),
}

impl Error {
    /// HTTP status code a server should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Upstream { status, .. } => *status,
            Error::Internal(_) => 500,
            Error::NotFound(_) => 404,
            Error::MethodNotAllowed(_) => 405,
        }
    }

    /// Message suitable for showing to the caller, without the error code prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(msg)
            | Error::Internal(msg)
            | Error::NotFound(msg)
            | Error::MethodNotAllowed(msg)
            | Error::Upstream { message: msg, .. } => msg,
        }
    }
}
