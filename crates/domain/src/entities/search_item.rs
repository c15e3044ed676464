//! Search result item
//!
//! A normalized product returned by the item search. Items are transient and
//! never persisted.

use serde::{Deserialize, Serialize};

/// Query parameter carrying the affiliate tag on item URLs
pub const AFFILIATE_PARAM: &str = "af";

/// A product matching a keyword search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Display name
    pub name: String,
    /// Price in whole currency units
    pub price: u64,
    /// Absolute product URL
    pub url: String,
}

impl SearchResultItem {
    /// Create a new search result item
    #[must_use]
    pub fn new(name: impl Into<String>, price: u64, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            url: url.into(),
        }
    }

    /// Append the affiliate tag to the item URL
    ///
    /// Uses `&` when the URL already has a query string, `?` otherwise.
    /// An empty tag leaves the URL untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::SearchResultItem;
    ///
    /// let item = SearchResultItem::new("Tea", 500, "https://shop.example/item?x=1")
    ///     .with_affiliate_tag("AFF1");
    /// assert_eq!(item.url, "https://shop.example/item?x=1&af=AFF1");
    ///
    /// let item = SearchResultItem::new("Tea", 500, "https://shop.example/item")
    ///     .with_affiliate_tag("AFF1");
    /// assert_eq!(item.url, "https://shop.example/item?af=AFF1");
    /// ```
    #[must_use]
    pub fn with_affiliate_tag(mut self, tag: &str) -> Self {
        if tag.is_empty() {
            return self;
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!("{}{separator}{AFFILIATE_PARAM}={tag}", self.url);
        self
    }
}

/// Sort items by price ascending and keep the first `limit`
///
/// The sort is stable, so items with equal prices keep their upstream order.
#[must_use]
pub fn cheapest_first(mut items: Vec<SearchResultItem>, limit: usize) -> Vec<SearchResultItem> {
    items.sort_by_key(|item| item.price);
    items.truncate(limit);
    items
}
