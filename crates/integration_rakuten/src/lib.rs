#![forbid(unsafe_code)]
//! Rakuten Ichiba item search integration
//!
//! Thin HTTP client for the Ichiba Item Search API
//! (`IchibaItem/Search/20170706`). It fetches purchasable items for a keyword
//! and reports upstream errors with their error code, so callers can tell an
//! invalid application id apart from other failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_rakuten::{RakutenClient, RakutenConfig};
//!
//! let client = RakutenClient::new(RakutenConfig::default())?;
//! let items = client.search_items("1012973846241817900", "green tea").await?;
//! for item in items {
//!     println!("{} ({} JPY) {}", item.name, item.price, item.url);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::RakutenClient;
pub use config::RakutenConfig;
pub use error::{RakutenError, WRONG_PARAMETER};
pub use models::ItemSummary;
