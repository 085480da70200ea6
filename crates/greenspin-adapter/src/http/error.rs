/*
[INPUT]:  Error sources (HTTP transport, status codes, undecodable bodies, URL parsing, file IO)
[OUTPUT]: Structured error types for the task service client
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the GreenSpin task service client
#[derive(Error, Debug)]
pub enum GreenSpinError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reading a local attachment failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GreenSpinError {
    /// Create an API error from status code and response body
    pub fn api_error(status: StatusCode, body: impl Into<String>) -> Self {
        GreenSpinError::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Whether the service was reached but sent something unusable
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, GreenSpinError::InvalidResponse(_))
    }
}

/// Result type alias for GreenSpin client operations
pub type Result<T> = std::result::Result<T, GreenSpinError>;
