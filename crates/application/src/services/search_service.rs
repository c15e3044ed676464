//! Search service
//!
//! Runs a keyword search against the upstream API using the stored
//! credentials, keeps the cheapest items and tags their URLs with the
//! affiliate tag.

use std::sync::Arc;

use domain::{SearchKeyword, SearchResultItem, SettingsRecord, cheapest_first};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CandidateFetch, ItemSearchPort, SettingsStore},
};

/// Maximum number of items returned to the caller
pub const MAX_RESULTS: usize = 10;

/// Message returned when a search runs before settings were saved
pub const MISSING_SETTINGS_MESSAGE: &str =
    "Application ID is not configured, please save your settings first";

const INVALID_PARAMETER_MESSAGE: &str =
    "Upstream API rejected the request parameters, check applicationId";

/// Service implementing the keyword search use case
pub struct SearchService {
    settings: Arc<dyn SettingsStore>,
    items: Arc<dyn ItemSearchPort>,
    max_results: usize,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("provider", &self.items.provider_name())
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// Create a new search service
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>, items: Arc<dyn ItemSearchPort>) -> Self {
        Self {
            settings,
            items,
            max_results: MAX_RESULTS,
        }
    }

    /// Search for the cheapest items matching `keyword`
    ///
    /// The keyword is validated before the stored settings are consulted.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResultItem>, ApplicationError> {
        let keyword = SearchKeyword::new(keyword)?;
        let settings = self.settings.load().await?;
        self.search_with_settings(&keyword, settings.as_ref()).await
    }

    async fn search_with_settings(
        &self,
        keyword: &SearchKeyword,
        settings: Option<&SettingsRecord>,
    ) -> Result<Vec<SearchResultItem>, ApplicationError> {
        let settings = settings.ok_or_else(|| {
            ApplicationError::MissingConfiguration(MISSING_SETTINGS_MESSAGE.to_string())
        })?;

        let candidates = match self
            .items
            .fetch_candidates(keyword, settings.application_id())
            .await
        {
            CandidateFetch::Items(items) => items,
            CandidateFetch::InvalidParameter => {
                warn!(
                    provider = self.items.provider_name(),
                    "Upstream rejected request parameters"
                );
                return Err(ApplicationError::InvalidInput(
                    INVALID_PARAMETER_MESSAGE.to_string(),
                ));
            },
            CandidateFetch::Failed(message) => {
                warn!(
                    provider = self.items.provider_name(),
                    error = %message,
                    "Upstream search failed"
                );
                return Err(ApplicationError::ExternalService(message));
            },
        };

        let candidate_count = candidates.len();
        let tag = settings.affiliate_tag();
        let items: Vec<SearchResultItem> = cheapest_first(candidates, self.max_results)
            .into_iter()
            .map(|item| item.with_affiliate_tag(tag))
            .collect();

        debug!(
            keyword = %keyword,
            candidates = candidate_count,
            returned = items.len(),
            "Search completed"
        );

        Ok(items)
    }
}
