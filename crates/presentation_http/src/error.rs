//! API error handling
//!
//! Maps application errors to HTTP responses with a `{error, code}` body.
//! In production mode, messages that look like they carry implementation
//! details are replaced by generic text.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Configure whether internal error details should be exposed in responses.
///
/// Disabled for `Environment::Production`.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

fn sanitize_error_message(msg: &str) -> String {
    if should_expose_details() {
        msg.to_string()
    } else {
        redact(msg)
    }
}

/// Replace messages that mention paths, URLs, database or transport internals
fn redact(msg: &str) -> String {
    const SENSITIVE_PATTERNS: [&str; 12] = [
        "/home/",
        "/var/",
        "/etc/",
        "c:\\",
        "://",
        "sqlite",
        "database",
        "panicked at",
        ".rs:",
        "connection refused",
        "error sending request",
        "dns error",
    ];

    let lower = msg.to_lowercase();
    if SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
    {
        GENERIC_MESSAGE.to_string()
    } else {
        msg.to_string()
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was invalid (or the upstream rejected its parameters)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Settings must be saved before searching
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The upstream search API failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details (development only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                sanitize_error_message(&msg),
                None,
            ),
            Self::MissingConfiguration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "missing_configuration",
                msg,
                None,
            ),
            Self::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream_error",
                sanitize_error_message(&msg),
                None,
            ),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
                should_expose_details().then_some(msg),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %message, "Request failed");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::MissingConfiguration(msg) => Self::MissingConfiguration(msg),
            ApplicationError::ExternalService(msg) => Self::Upstream(msg),
            ApplicationError::Storage(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
