//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize`. Ids are plain integers.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Report Responses
// ============================================================================

/// Report as shown to visitors and moderators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResponse {
    pub id: i64,
    pub report_type: &'static str,
    pub source_from: Option<String>,
    pub subject: Option<String>,
    pub message_content: String,
    /// Absolute instant in UTC
    pub received_at: Option<DateTime<Utc>>,
    /// The same instant rendered in the zone it was entered in (RFC 3339)
    pub received_at_local: Option<String>,
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
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentResponse>,
}

/// Attachment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentResponse {
    pub id: i64,
    pub report_id: i64,
    pub original_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub is_image: bool,
    pub created_at: DateTime<Utc>,
}

/// Attachment bytes ready to be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDownload {
    pub attachment: AttachmentResponse,
    pub bytes: Vec<u8>,
}

/// Extracted link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub url: String,
    pub domain: String,
    pub safety: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Moderation Responses
// ============================================================================

/// One entry of a report's audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntryResponse {
    pub id: i64,
    pub action: &'static str,
    pub comment: Option<String>,
    /// Moderator name, or "system"
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a moderation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationResponse {
    pub applied: bool,
    /// `not_found` or `deleted` when nothing was changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditEntryResponse>,
}

// ============================================================================
// Search Responses
// ============================================================================

/// Public listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicSearchResponse {
    pub reports: Vec<ReportResponse>,
    pub limit: i64,
}

/// Moderator listing page with dashboard counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSearchResponse {
    pub reports: Vec<ReportResponse>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub total_all: i64,
    pub total_flagged: i64,
    pub total_deleted: i64,
}

// ============================================================================
// Link Extraction Responses
// ============================================================================

/// Counts from extracting one report's links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionResponse {
    pub report_id: i64,
    pub inserted: u64,
    pub skipped: u64,
}
