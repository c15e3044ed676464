//! Search keyword value object
//!
//! # Examples
//!
//! ```
//! use domain::SearchKeyword;
//!
//! let keyword = SearchKeyword::new("green tea").unwrap();
//! assert_eq!(keyword.as_str(), "green tea");
//!
//! assert!(SearchKeyword::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A search keyword with at least one non-whitespace character, kept as given
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchKeyword(String);

impl SearchKeyword {
    /// Create a keyword, rejecting empty or whitespace-only input
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] if the keyword is blank.
    pub fn new(keyword: impl Into<String>) -> Result<Self, DomainError> {
        let value = keyword.into();
        if value.trim().is_empty() {
            return Err(DomainError::missing("keyword"));
        }
        Ok(Self(value))
    }

    /// Get the keyword as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SearchKeyword {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchKeyword> for String {
    fn from(keyword: SearchKeyword) -> Self {
        keyword.0
    }
}

impl fmt::Display for SearchKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchKeyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
