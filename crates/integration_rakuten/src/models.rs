//! Rakuten API data models

use serde::{Deserialize, Serialize};

/// A single item from an Ichiba item search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSummary {
    /// Display name of the item
    pub name: String,

    /// Price in JPY
    pub price: u64,

    /// Canonical item page URL
    pub url: String,
}

/// Rakuten API response structures
pub(crate) mod api {
    use serde::Deserialize;

    /// Item search response body
    ///
    /// `Items` is absent on some responses; that is treated as no results.
    #[derive(Debug, Deserialize)]
    pub struct ItemSearchResponse {
        #[serde(rename = "Items")]
        pub items: Option<Vec<ItemEntry>>,
    }

    /// Item entry, wrapped in `{"Item": {...}}` for `formatVersion=1`
    /// and flat for `formatVersion=2`
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum ItemEntry {
        Wrapped {
            #[serde(rename = "Item")]
            item: Item,
        },
        Flat(Item),
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Item {
        pub item_name: String,
        pub item_price: u64,
        pub item_url: String,
    }

    /// Error response body
    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
        pub error_description: Option<String>,
    }
}

impl From<api::ItemEntry> for ItemSummary {
    fn from(entry: api::ItemEntry) -> Self {
        let item = match entry {
            api::ItemEntry::Wrapped { item } | api::ItemEntry::Flat(item) => item,
        };
        Self {
            name: item.item_name,
            price: item.item_price,
            url: item.item_url,
        }
    }
}
