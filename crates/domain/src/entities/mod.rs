//! Domain entities

mod search_item;
mod settings_record;

pub use search_item::{AFFILIATE_PARAM, SearchResultItem, cheapest_first};
pub use settings_record::SettingsRecord;
