//! Moderator classification labels

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length of a custom classification label
pub const MAX_CUSTOM_LABEL_LEN: usize = 64;

/// Classification assigned to a report
///
/// A small fixed vocabulary plus a validated custom escape hatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Classification {
    #[default]
    Unclassified,
    Scam,
    Phishing,
    Spam,
    Legitimate,
    Other(String),
}

impl Classification {
    /// Parse a label, accepting the fixed vocabulary case-insensitively
    /// and anything else as a custom label.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let trimmed = label.trim();
        let known = match trimmed.to_ascii_lowercase().as_str() {
            "unclassified" => Some(Self::Unclassified),
            "scam" => Some(Self::Scam),
            "phishing" => Some(Self::Phishing),
            "spam" => Some(Self::Spam),
            "legitimate" => Some(Self::Legitimate),
            _ => None,
        };
        if let Some(known) = known {
            return Ok(known);
        }

        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "classification label must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_CUSTOM_LABEL_LEN {
            return Err(DomainError::InvalidInput(format!(
                "classification label exceeds {MAX_CUSTOM_LABEL_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::InvalidInput(
                "classification label contains control characters".to_string(),
            ));
        }
        Ok(Self::Other(trimmed.to_string()))
    }

    /// Parse a value read back from storage. Stored labels were validated on
    /// the way in, so anything unrecognised is kept verbatim.
    #[must_use]
    pub fn from_stored(label: &str) -> Self {
        Self::parse(label).unwrap_or_else(|_| Self::Other(label.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unclassified => "unclassified",
            Self::Scam => "scam",
            Self::Phishing => "phishing",
            Self::Spam => "spam",
            Self::Legitimate => "legitimate",
            Self::Other(label) => label,
        }
    }

    #[inline]
    pub fn is_unclassified(&self) -> bool {
        matches!(self, Self::Unclassified)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Classification {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.as_str().to_string()
    }
}
