//! Link entity - a URL found in a report's text

use chrono::{DateTime, Utc};

use crate::value_objects::{LinkId, ReportId};

/// Link entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub report_id: ReportId,
    pub url: String,
    pub domain: String,
    /// Never assigned by this crate
    pub safety: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

/// A link about to be recorded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewLink {
    pub url: String,
    pub domain: String,
}
