//! Item search port
//!
//! Defines the interface to the upstream e-commerce search API. The port only
//! fetches raw candidates; ranking and affiliate tagging happen in
//! [`SearchService`](crate::services::SearchService).

use async_trait::async_trait;
use domain::{SearchKeyword, SearchResultItem};
#[cfg(test)]
use mockall::automock;

/// Outcome of an upstream candidate fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFetch {
    /// Normalized candidates in upstream order (may be empty)
    Items(Vec<SearchResultItem>),
    /// The upstream rejected the request parameters (usually the application id)
    InvalidParameter,
    /// Any other upstream failure, carrying the upstream message
    Failed(String),
}

/// Port for upstream item search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemSearchPort: Send + Sync {
    /// Fetch purchasable items matching `keyword`, authenticated with `application_id`
    async fn fetch_candidates(
        &self,
        keyword: &SearchKeyword,
        application_id: &str,
    ) -> CandidateFetch;

    /// Name of the upstream provider, for logging
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ItemSearchPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ItemSearchPort>();
    }

    #[tokio::test]
    async fn mock_returns_configured_outcome() {
        let mut mock = MockItemSearchPort::new();
        mock.expect_fetch_candidates()
            .returning(|_, _| CandidateFetch::InvalidParameter);

        let keyword = SearchKeyword::new("tea").unwrap();
        let outcome = mock.fetch_candidates(&keyword, "app").await;
        assert_eq!(outcome, CandidateFetch::InvalidParameter);
    }
}
