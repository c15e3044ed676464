//! Settings service
//!
//! Validates and stores the API credentials used by the search flow.

use std::sync::Arc;

use domain::SettingsRecord;
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::SettingsStore};

/// Service for reading and replacing the settings record
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}

impl SettingsService {
    /// Create a new settings service backed by `store`
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new settings record, replacing any previous one
    ///
    /// The stored record is left untouched when validation fails.
    #[instrument(skip(self, application_secret))]
    pub async fn save(
        &self,
        application_id: &str,
        affiliate_tag: &str,
        application_secret: Option<&str>,
    ) -> Result<SettingsRecord, ApplicationError> {
        let record = SettingsRecord::new(
            application_id,
            affiliate_tag,
            application_secret.map(ToString::to_string),
        )?;

        self.store.save(&record).await?;

        info!("Settings saved");
        Ok(record)
    }

    /// Load the stored settings record
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Option<SettingsRecord>, ApplicationError> {
        let record = self.store.load().await?;
        debug!(configured = record.is_some(), "Loaded settings");
        Ok(record)
    }
}
