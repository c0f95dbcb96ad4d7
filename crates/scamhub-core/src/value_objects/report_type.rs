//! Channel a scam reached the reporter through

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Report type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Sms,
    Call,
    Email,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [Self::Sms, Self::Call, Self::Email];

    /// Stored text value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Call => "call",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" => Ok(Self::Sms),
            "call" => Ok(Self::Call),
            "email" => Ok(Self::Email),
            other => Err(DomainError::InvalidInput(format!(
                "unknown report type: {other}"
            ))),
        }
    }
}
