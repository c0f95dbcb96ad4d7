//! Audit trail action vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Action recorded on an audit entry
///
/// Closed set so the trail stays analyzable; anything that is not a
/// moderation transition is recorded as `Other` with a free-text comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Flag,
    Unflag,
    Delete,
    Triage,
    Forward,
    Verify,
    Classify,
    Other,
}

impl AuditAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Unflag => "unflag",
            Self::Delete => "delete",
            Self::Triage => "triage",
            Self::Forward => "forward",
            Self::Verify => "verify",
            Self::Classify => "classify",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "unflag" => Ok(Self::Unflag),
            "delete" => Ok(Self::Delete),
            "triage" => Ok(Self::Triage),
            "forward" => Ok(Self::Forward),
            "verify" => Ok(Self::Verify),
            "classify" => Ok(Self::Classify),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvalidInput(format!(
                "unknown audit action: {other}"
            ))),
        }
    }
}
