//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the SQLite
//! settings store and the Rakuten item search adapter. Also hosts
//! configuration loading, startup validation and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, ServerConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteSettingsStore, create_pool};
pub use telemetry::{TelemetryError, init_logging};
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
