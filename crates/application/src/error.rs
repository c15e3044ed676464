//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input accepted locally but rejected by the upstream service
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Settings have not been saved yet
    #[error("{0}")]
    MissingConfiguration(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error was caused by the caller's input
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::InvalidInput(_))
    }
}
