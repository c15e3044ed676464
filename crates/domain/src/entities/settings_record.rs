//! Settings record entity
//!
//! The single credential set used to call the upstream item search API.
//! At most one record exists; saving a new one replaces the previous record.

use serde::Serialize;

use crate::errors::DomainError;

/// Stored API credentials
///
/// `application_id` authenticates against the upstream search API,
/// `affiliate_tag` is appended to outgoing item URLs. The secret is kept for
/// the settings form but not used by the search flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    application_id: String,
    affiliate_tag: String,
    application_secret: String,
}

impl SettingsRecord {
    /// Create a new settings record, validating required fields
    ///
    /// Values are stored exactly as given. A missing secret is stored as an
    /// empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::SettingsRecord;
    ///
    /// let record = SettingsRecord::new("1012973846241817900", "49a6faea.dc7c294e", None).unwrap();
    /// assert_eq!(record.application_id(), "1012973846241817900");
    /// assert_eq!(record.application_secret(), "");
    ///
    /// assert!(SettingsRecord::new("", "49a6faea.dc7c294e", None).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] if the application id or the
    /// affiliate tag is empty or whitespace-only.
    pub fn new(
        application_id: impl Into<String>,
        affiliate_tag: impl Into<String>,
        application_secret: Option<String>,
    ) -> Result<Self, DomainError> {
        let application_id = application_id.into();
        if is_blank(&application_id) {
            return Err(DomainError::missing("applicationId"));
        }

        let affiliate_tag = affiliate_tag.into();
        if is_blank(&affiliate_tag) {
            return Err(DomainError::missing("affiliateTag"));
        }

        Ok(Self {
            application_id,
            affiliate_tag,
            application_secret: application_secret.unwrap_or_default(),
        })
    }

    /// Restore a record from storage without re-validating
    #[must_use]
    pub const fn restore(
        application_id: String,
        affiliate_tag: String,
        application_secret: String,
    ) -> Self {
        Self {
            application_id,
            affiliate_tag,
            application_secret,
        }
    }

    /// Upstream API authentication id
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Affiliate tag appended to item URLs
    #[must_use]
    pub fn affiliate_tag(&self) -> &str {
        &self.affiliate_tag
    }

    /// Optional application secret (empty when not provided)
    #[must_use]
    pub fn application_secret(&self) -> &str {
        &self.application_secret
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
