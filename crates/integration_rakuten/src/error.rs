//! Rakuten API error types

use thiserror::Error;

/// Error code the API returns for invalid request parameters
pub const WRONG_PARAMETER: &str = "wrong_parameter";

/// Errors that can occur while calling the Rakuten API
#[derive(Debug, Error)]
pub enum RakutenError {
    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed before a response was received
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API returned an error response
    #[error("{}", api_message(.code, .description.as_deref()))]
    Api {
        /// HTTP status code
        status: u16,
        /// Error code from the response body (e.g. `wrong_parameter`)
        code: String,
        /// Human-readable description, when provided
        description: Option<String>,
    },

    /// Failed to parse the API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Client configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

fn api_message(code: &str, description: Option<&str>) -> String {
    match description {
        Some(description) if !description.is_empty() => format!("{code}: {description}"),
        _ => code.to_string(),
    }
}

impl RakutenError {
    /// Returns true if the API rejected the request parameters
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == WRONG_PARAMETER)
    }
}
