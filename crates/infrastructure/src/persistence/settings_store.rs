//! SQLite settings store implementation
//!
//! Implements the `SettingsStore` port using a single-row SQLite table.

use std::sync::Arc;

use application::{error::ApplicationError, ports::SettingsStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::SettingsRecord;
use rusqlite::{OptionalExtension, TransactionBehavior, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based settings store
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteSettingsStore {
    /// Create a new SQLite settings store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Timestamp of the last successful save, if any
    ///
    /// # Errors
    ///
    /// Returns a storage error if the database cannot be queried.
    #[instrument(skip(self))]
    pub async fn updated_at(&self) -> Result<Option<DateTime<Utc>>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            let updated_at: Option<String> = conn
                .query_row("SELECT updated_at FROM settings WHERE id = 1", [], |row| {
                    row.get(0)
                })
                .optional()
                .map_err(storage_error)?;

            updated_at
                .map(|value| {
                    DateTime::parse_from_rfc3339(&value)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(storage_error)
                })
                .transpose()
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn storage_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Storage(e.to_string())
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    #[instrument(skip(self, record))]
    async fn save(&self, record: &SettingsRecord) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let record = record.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(storage_error)?;

            // Writers take the lock up front so concurrent saves serialize
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(storage_error)?;

            tx.execute("DELETE FROM settings", [])
                .map_err(storage_error)?;
            tx.execute(
                "INSERT INTO settings (id, application_id, affiliate_tag, application_secret, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4)",
                params![
                    record.application_id(),
                    record.affiliate_tag(),
                    record.application_secret(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(storage_error)?;

            tx.commit().map_err(storage_error)?;

            debug!("Saved settings");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<Option<SettingsRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            let record = conn
                .query_row(
                    "SELECT application_id, affiliate_tag, application_secret
                     FROM settings WHERE id = 1",
                    [],
                    |row| {
                        Ok(SettingsRecord::restore(
                            row.get(0)?,
                            row.get(1)?,
                            row.get(2)?,
                        ))
                    },
                )
                .optional()
                .map_err(storage_error)?;

            debug!(found = record.is_some(), "Loaded settings");
            Ok(record)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
