//! Value Objects - Immutable, identity-less domain primitives

mod search_keyword;

pub use search_keyword::SearchKeyword;
