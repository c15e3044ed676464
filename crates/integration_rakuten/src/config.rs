//! Rakuten API client configuration

use serde::{Deserialize, Serialize};

/// Largest page size accepted by the Ichiba Item Search API
const MAX_HITS: u32 = 30;

/// Configuration for the Rakuten Ichiba item search client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RakutenConfig {
    /// API base URL (without the `IchibaItem/...` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of candidates requested per search
    #[serde(default = "default_hits")]
    pub hits: u32,

    /// Only request items that are currently available for purchase
    #[serde(default = "default_availability")]
    pub availability_only: bool,
}

fn default_base_url() -> String {
    "https://app.rakuten.co.jp/services/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_hits() -> u32 {
    20
}

const fn default_availability() -> bool {
    true
}

impl Default for RakutenConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            hits: default_hits(),
            availability_only: default_availability(),
        }
    }
}

impl RakutenConfig {
    /// Create a configuration pointing at `base_url` (for tests against a mock server)
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.hits == 0 || self.hits > MAX_HITS {
            return Err(format!("hits must be between 1 and {MAX_HITS}"));
        }

        Ok(())
    }
}
