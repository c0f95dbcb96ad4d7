//! Visibility-aware report filters
//!
//! Public and moderator searches both reduce to a [`ReportFilter`]; stores
//! only ever execute a `ReportFilter`, so the implicit visibility rules
//! cannot be bypassed by a caller-built query.

use serde::{Deserialize, Serialize};

use crate::entities::Report;
use crate::error::DomainError;
use crate::value_objects::ReportType;

/// Maximum rows returned by a public search
pub const PUBLIC_SEARCH_LIMIT: i64 = 200;

/// Rows per page in the moderator listing
pub const ADMIN_PAGE_SIZE: i64 = 25;

/// Normalized filter executed by report stores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive substring matched against message, source and subject
    pub text: Option<String>,
    pub report_type: Option<ReportType>,
    pub include_deleted: bool,
    /// `Some(false)` hides flagged reports, `Some(true)` shows only flagged
    pub flagged: Option<bool>,
}

impl ReportFilter {
    /// Evaluate the filter against a report in memory
    pub fn matches(&self, report: &Report) -> bool {
        if !self.include_deleted && report.deleted {
            return false;
        }
        if let Some(flagged) = self.flagged {
            if report.flagged != flagged {
                return false;
            }
        }
        if let Some(ty) = self.report_type {
            if report.report_type != ty {
                return false;
            }
        }
        match &self.text {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [
                    Some(report.message_content.as_str()),
                    report.source_from.as_deref(),
                    report.subject.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }

    /// Text pattern for SQL `ILIKE`, with wildcards in user input escaped
    pub fn like_pattern(&self) -> Option<String> {
        self.text.as_deref().map(|t| format!("%{}%", escape_like(t)))
    }
}

fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Escape `%`, `_` and `\` so user text matches literally under `ILIKE`
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Anonymous visitor search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSearch {
    pub text: Option<String>,
    pub report_type: Option<ReportType>,
}

impl PublicSearch {
    /// Deleted and flagged reports are never part of a public result
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            text: normalize_text(self.text.clone()),
            report_type: self.report_type,
            include_deleted: false,
            flagged: Some(false),
        }
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        PUBLIC_SEARCH_LIMIT
    }
}

/// Flag status filter on the moderator listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Flagged,
    Unflagged,
}

impl std::str::FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "flagged" => Ok(Self::Flagged),
            "unflagged" => Ok(Self::Unflagged),
            other => Err(DomainError::InvalidInput(format!("unknown status filter: {other}"))),
        }
    }
}

/// Moderator search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSearch {
    pub text: Option<String>,
    pub report_type: Option<ReportType>,
    pub status: StatusFilter,
    pub show_deleted: bool,
    /// 1-based page number
    pub page: i64,
}

impl Default for AdminSearch {
    fn default() -> Self {
        Self {
            text: None,
            report_type: None,
            status: StatusFilter::All,
            show_deleted: false,
            page: 1,
        }
    }
}

impl AdminSearch {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            text: normalize_text(self.text.clone()),
            report_type: self.report_type,
            include_deleted: self.show_deleted,
            flagged: match self.status {
                StatusFilter::All => None,
                StatusFilter::Flagged => Some(true),
                StatusFilter::Unflagged => Some(false),
            },
        }
    }

    /// Page number clamped to at least 1
    #[inline]
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(ADMIN_PAGE_SIZE)
    }
}

/// Unfiltered dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounters {
    pub total_all: i64,
    pub total_flagged: i64,
    pub total_deleted: i64,
}

/// One page of the moderator listing
#[derive(Debug, Clone, PartialEq)]
pub struct AdminPage {
    pub reports: Vec<Report>,
    /// Rows matching the filter across all pages
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub counters: ReportCounters,
}

/// Number of pages needed for `total` rows, never less than one
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 1;
    }
    ((total + page_size - 1) / page_size).max(1)
}
