//! Rakuten Ichiba item search client
//!
//! Client for the Ichiba Item Search API
//! (<https://webservice.rakuten.co.jp/documentation/ichiba-item-search>).

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    config::RakutenConfig,
    error::RakutenError,
    models::{ItemSummary, api},
};

/// API path of the item search endpoint
const ITEM_SEARCH_PATH: &str = "IchibaItem/Search/20170706";

/// Rakuten Ichiba HTTP client
#[derive(Debug, Clone)]
pub struct RakutenClient {
    client: Client,
    config: RakutenConfig,
}

impl RakutenClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: RakutenConfig) -> Result<Self, RakutenError> {
        config
            .validate()
            .map_err(RakutenError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RakutenError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, RakutenError> {
        Self::new(RakutenConfig::default())
    }

    /// Full URL of the item search endpoint
    fn search_url(&self) -> String {
        format!(
            "{}/{ITEM_SEARCH_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Query parameters for an item search
    fn search_params(&self, application_id: &str, keyword: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("applicationId", application_id.to_string()),
            ("keyword", keyword.to_string()),
            ("hits", self.config.hits.to_string()),
            ("format", "json".to_string()),
        ];
        if self.config.availability_only {
            params.push(("availability", "1".to_string()));
        }
        params
    }

    /// Search purchasable items for `keyword`
    ///
    /// Returns items in upstream order. A response without an `Items`
    /// collection yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RakutenError::Api`] when the API answers with an error body
    /// (check [`RakutenError::is_invalid_parameter`]), or a transport/parse
    /// error otherwise.
    #[instrument(skip(self, application_id), fields(provider = "rakuten"))]
    pub async fn search_items(
        &self,
        application_id: &str,
        keyword: &str,
    ) -> Result<Vec<ItemSummary>, RakutenError> {
        let start = Instant::now();
        let timeout_secs = self.config.timeout_secs;

        let response = self
            .client
            .get(self.search_url())
            .query(&self.search_params(application_id, keyword))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RakutenError::Timeout { timeout_secs }
                } else if e.is_connect() {
                    RakutenError::ConnectionFailed(e.to_string())
                } else {
                    RakutenError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        debug!(status = %status, "Received Rakuten response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Rakuten API error");
            return Err(Self::api_error(status.as_u16(), &body));
        }

        let api_response: api::ItemSearchResponse = response
            .json()
            .await
            .map_err(|e| RakutenError::ParseError(e.to_string()))?;

        let items: Vec<ItemSummary> = api_response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(ItemSummary::from)
            .collect();

        debug!(
            results = items.len(),
            time_ms = start.elapsed().as_millis(),
            "Rakuten item search completed"
        );

        Ok(items)
    }

    /// Build an API error from a non-success response body
    fn api_error(status: u16, body: &str) -> RakutenError {
        match serde_json::from_str::<api::ErrorBody>(body) {
            Ok(error) => RakutenError::Api {
                status,
                code: error.error,
                description: error.error_description,
            },
            Err(_) => RakutenError::Api {
                status,
                code: format!("http_{status}"),
                description: (!body.is_empty()).then(|| body.to_string()),
            },
        }
    }
}
