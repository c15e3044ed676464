//! Adapters implementing application ports

mod rakuten_adapter;

pub use rakuten_adapter::RakutenItemSearchAdapter;
