//! Error types for the HTTP pipeline.

use thiserror::Error;

/// Errors that can occur while parsing requests.
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP parsing error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid HTTP method.
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// Invalid URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

impl From<httparse::Error> for HttpError {
    fn from(err: httparse::Error) -> Self {
        HttpError::Parse(err.to_string())
    }
}

impl From<http::uri::InvalidUri> for HttpError {
    fn from(err: http::uri::InvalidUri) -> Self {
        HttpError::InvalidUri(err.to_string())
    }
}

impl From<http::method::InvalidMethod> for HttpError {
    fn from(err: http::method::InvalidMethod) -> Self {
        HttpError::InvalidMethod(err.to_string())
    }
}
