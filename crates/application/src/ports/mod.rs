//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod item_search_port;
mod settings_store;

pub use item_search_port::{CandidateFetch, ItemSearchPort};
#[cfg(test)]
pub use item_search_port::MockItemSearchPort;
pub use settings_store::SettingsStore;
#[cfg(test)]
pub use settings_store::MockSettingsStore;
