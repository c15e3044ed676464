//! Application services - Use case implementations

mod search_service;
mod settings_service;

pub use search_service::{MAX_RESULTS, MISSING_SETTINGS_MESSAGE, SearchService};
pub use settings_service::SettingsService;
