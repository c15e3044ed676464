//! Settings storage port
//!
//! Defines the interface for persisting the single settings record.

use async_trait::async_trait;
use domain::SettingsRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the singleton settings record
///
/// Implementations must replace the stored record atomically: a concurrent
/// `load` sees either the previous record or the new one, never a mix.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Replace the stored record
    async fn save(&self, record: &SettingsRecord) -> Result<(), ApplicationError>;

    /// Load the stored record, `None` if nothing was saved yet
    async fn load(&self) -> Result<Option<SettingsRecord>, ApplicationError>;
}
