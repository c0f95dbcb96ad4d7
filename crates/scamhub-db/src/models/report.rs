//! Report database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Column list selected for every report query, in `ReportModel` order
pub const REPORT_COLUMNS: &str = "id, report_type, source_from, subject, message_content, \
    received_at, received_at_tz, reporter_name, reporter_contact, \
    suggested_classification, classification, classified_by, classified_at, \
    verified, verified_by, verified_at, \
    flagged, flag_reason, flagged_by, flagged_at, \
    deleted, deleted_at, \
    reported_via, ocr_preview, spam_score, contain_link, \
    created_at, updated_at";

/// Database model for reports table
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: i64,
    pub report_type: String,
    pub source_from: Option<String>,
    pub subject: Option<String>,
    pub message_content: String,
    pub received_at: Option<DateTime<Utc>>,
    pub received_at_tz: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub suggested_classification: String,
    pub classification: String,
    pub classified_by: Option<String>,
    pub classified_at: Option<DateTime<Utc>>,
    pub verified: bool,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    pub flagged_by: Option<String>,
    pub flagged_at: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub reported_via: Option<String>,
    pub ocr_preview: Option<String>,
    pub spam_score: Option<f64>,
    pub contain_link: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportModel {
    /// Check if report is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}
