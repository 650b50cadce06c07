//! # Parties
//!
//! A party is someone who took part in the conversation. Dialog entries
//! refer to parties by their position in the document's party list.

use serde::{Deserialize, Serialize};
use vcon_core::ValidationError;

/// A conversation participant.
///
/// At least one identifying field must be present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    /// Telephone number, without the `tel:` scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,

    /// Email address, without the `mailto:` scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Party {
    /// Build a party from a telephone number or `tel:` URL.
    ///
    /// Accepts digits and the visual separators `+ - . ( )`.
    pub fn from_tel_url(tel_url: &str) -> Result<Self, ValidationError> {
        let number = tel_url.trim();
        let number = number.strip_prefix("tel:").unwrap_or(number);
        let valid = !number.is_empty()
            && number.chars().any(|c| c.is_ascii_digit())
            && number
                .chars()
                .all(|c| c.is_ascii_digit() || "+-.()".contains(c));
        if !valid {
            return Err(ValidationError::InvalidTelUrl(tel_url.to_string()));
        }
        Ok(Self {
            tel: Some(number.to_string()),
            ..Self::default()
        })
    }

    /// Check that the party carries at least one identifying field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let present = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.is_empty());
        if present(&self.tel) || present(&self.mailto) || present(&self.name) {
            Ok(())
        } else {
            Err(ValidationError::EmptyParty)
        }
    }
}
