//! Persistence module
//!
//! SQLite-based storage for the service settings.

pub mod connection;
pub mod migrations;
pub mod settings_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use settings_store::SqliteSettingsStore;
