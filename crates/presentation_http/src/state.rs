//! Application state shared across handlers

use std::sync::Arc;

use application::{ItemSearchPort, SearchService, SettingsService, SettingsStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings use case
    pub settings_service: Arc<SettingsService>,
    /// Search use case
    pub search_service: Arc<SearchService>,
}

impl AppState {
    /// Wire both use cases to the same settings store
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, items: Arc<dyn ItemSearchPort>) -> Self {
        Self {
            settings_service: Arc::new(SettingsService::new(Arc::clone(&store))),
            search_service: Arc::new(SearchService::new(store, items)),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("settings_service", &self.settings_service)
            .field("search_service", &self.search_service)
            .finish()
    }
}
