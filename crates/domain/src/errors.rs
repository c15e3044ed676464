//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field was missing or blank
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl DomainError {
    /// Create a missing field error
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
