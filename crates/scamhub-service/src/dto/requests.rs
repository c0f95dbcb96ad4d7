//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Report Requests
// ============================================================================

/// Report submission
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReportRequest {
    /// `sms`, `call` or `email`
    #[validate(length(min = 1, message = "report_type is required"))]
    pub report_type: String,

    #[validate(length(max = 320, message = "source_from must be at most 320 characters"))]
    pub source_from: Option<String>,

    #[validate(length(max = 500, message = "subject must be at most 500 characters"))]
    pub subject: Option<String>,

    #[validate(length(
        min = 1,
        max = 20000,
        message = "message_content must be 1-20000 characters"
    ))]
    pub message_content: String,

    /// ISO-8601 timestamp, with or without offset
    pub received_at: Option<String>,

    /// Wall-clock date and time as the reporter saw it
    pub received_local: Option<LocalReceivedAt>,

    /// IANA zone name the reporter entered the time in
    #[validate(length(max = 64, message = "received_at_tz must be at most 64 characters"))]
    pub received_at_tz: Option<String>,

    #[validate(length(max = 200, message = "reporter_name must be at most 200 characters"))]
    pub reporter_name: Option<String>,

    #[validate(length(max = 200, message = "reporter_contact must be at most 200 characters"))]
    pub reporter_contact: Option<String>,

    pub suggested_classification: Option<String>,

    #[validate(length(max = 50, message = "reported_via must be at most 50 characters"))]
    pub reported_via: Option<String>,

    pub ocr_preview: Option<String>,

    #[validate(range(min = 0.0, max = 1.0, message = "spam_score must be between 0 and 1"))]
    pub spam_score: Option<f64>,

    #[serde(default)]
    pub contain_link: bool,
}

impl CreateReportRequest {
    /// Minimal request for a report type and message
    pub fn new(report_type: impl Into<String>, message_content: impl Into<String>) -> Self {
        Self {
            report_type: report_type.into(),
            message_content: message_content.into(),
            ..Self::default()
        }
    }
}

/// Local date and time entered separately
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocalReceivedAt {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Metadata of a file already placed in blob storage
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachFileRequest {
    #[validate(length(min = 1, max = 255, message = "original_name must be 1-255 characters"))]
    pub original_name: String,

    #[validate(length(min = 1, message = "storage_path is required"))]
    pub storage_path: String,

    pub mime_type: Option<String>,

    #[validate(range(min = 0, message = "size_bytes must not be negative"))]
    pub size_bytes: i64,
}

// ============================================================================
// Moderation Requests
// ============================================================================

/// Moderator form submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModerationRequest {
    /// flag, unflag, delete, triage, forward, verify, classify or note
    #[validate(length(min = 1, message = "action is required"))]
    pub action: String,

    /// Flag reason or classification label
    #[validate(length(max = 500, message = "argument must be at most 500 characters"))]
    pub argument: Option<String>,

    #[validate(length(max = 2000, message = "comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Anonymous search form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PublicSearchRequest {
    #[validate(length(max = 200, message = "search text must be at most 200 characters"))]
    pub q: Option<String>,

    pub report_type: Option<String>,
}

/// Moderator search form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminSearchRequest {
    #[validate(length(max = 200, message = "search text must be at most 200 characters"))]
    pub q: Option<String>,

    pub report_type: Option<String>,

    /// all, flagged or unflagged
    pub status: Option<String>,

    #[serde(default)]
    pub show_deleted: bool,

    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
}
