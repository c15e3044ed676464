//! Rakuten item search adapter - Implements ItemSearchPort using integration_rakuten

use application::error::ApplicationError;
use application::ports::{CandidateFetch, ItemSearchPort};
use async_trait::async_trait;
use domain::{SearchKeyword, SearchResultItem};
use integration_rakuten::{ItemSummary, RakutenClient, RakutenConfig, RakutenError};
use tracing::{debug, instrument, warn};

/// Adapter for the Rakuten Ichiba item search API
pub struct RakutenItemSearchAdapter {
    client: RakutenClient,
}

impl std::fmt::Debug for RakutenItemSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RakutenItemSearchAdapter")
            .field("provider", &self.provider_name())
            .finish_non_exhaustive()
    }
}

impl RakutenItemSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: RakutenConfig) -> Result<Self, ApplicationError> {
        let client = RakutenClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn with_client(client: RakutenClient) -> Self {
        Self { client }
    }

    /// Map client construction errors to application errors
    fn map_error(err: RakutenError) -> ApplicationError {
        match err {
            RakutenError::ConfigurationError(msg) => {
                ApplicationError::Internal(format!("Invalid Rakuten configuration: {msg}"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    fn to_domain(item: ItemSummary) -> SearchResultItem {
        SearchResultItem::new(item.name, item.price, item.url)
    }
}

#[async_trait]
impl ItemSearchPort for RakutenItemSearchAdapter {
    #[instrument(skip(self, application_id), fields(keyword = %keyword))]
    async fn fetch_candidates(
        &self,
        keyword: &SearchKeyword,
        application_id: &str,
    ) -> CandidateFetch {
        match self
            .client
            .search_items(application_id, keyword.as_str())
            .await
        {
            Ok(items) => {
                debug!(count = items.len(), "Fetched candidates");
                CandidateFetch::Items(items.into_iter().map(Self::to_domain).collect())
            },
            Err(e) if e.is_invalid_parameter() => {
                warn!(error = %e, "Rakuten rejected request parameters");
                CandidateFetch::InvalidParameter
            },
            Err(e) => {
                warn!(error = %e, "Rakuten item search failed");
                CandidateFetch::Failed(e.to_string())
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "rakuten"
    }
}
