//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use scamhub_core::entities::{Attachment, AuditEntry, Link, Report};
use scamhub_core::moderation::{SkipReason, TransitionOutcome};
use scamhub_core::time::to_display;

use super::responses::{
    AttachmentResponse, AuditEntryResponse, LinkResponse, ModerationResponse, ReportResponse,
};

// ============================================================================
// Report Mappers
// ============================================================================

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        let received_at_local = to_display(report.received_at, report.received_at_tz.as_deref())
            .map(|local| local.to_rfc3339());

        Self {
            id: report.id.into_inner(),
            report_type: report.report_type.as_str(),
            source_from: report.source_from.clone(),
            subject: report.subject.clone(),
            message_content: report.message_content.clone(),
            received_at: report.received_at,
            received_at_local,
            received_at_tz: report.received_at_tz.clone(),
            reporter_name: report.reporter_name.clone(),
            reporter_contact: report.reporter_contact.clone(),
            suggested_classification: report.suggested_classification.to_string(),
            classification: report.classification.to_string(),
            classified_by: report.classified_by.clone(),
            classified_at: report.classified_at,
            verified: report.verified,
            verified_by: report.verified_by.clone(),
            verified_at: report.verified_at,
            flagged: report.flagged,
            flag_reason: report.flag_reason.clone(),
            flagged_by: report.flagged_by.clone(),
            flagged_at: report.flagged_at,
            deleted: report.deleted,
            deleted_at: report.deleted_at,
            reported_via: report.reported_via.clone(),
            ocr_preview: report.ocr_preview.clone(),
            spam_score: report.spam_score,
            contain_link: report.contain_link,
            created_at: report.created_at,
            updated_at: report.updated_at,
            attachments: Vec::new(),
        }
    }
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self::from(&report)
    }
}

impl ReportResponse {
    /// Attach the visible attachments belonging to this report
    pub fn with_attachments(mut self, attachments: Vec<AttachmentResponse>) -> Self {
        self.attachments = attachments;
        self
    }
}

// ============================================================================
// Attachment / Link Mappers
// ============================================================================

impl From<&Attachment> for AttachmentResponse {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id.into_inner(),
            report_id: attachment.report_id.into_inner(),
            original_name: attachment.original_name.clone(),
            content_type: attachment.content_type().to_string(),
            size_bytes: attachment.size_bytes,
            is_image: attachment.is_image(),
            created_at: attachment.created_at,
        }
    }
}

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        Self::from(&attachment)
    }
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id.into_inner(),
            url: link.url,
            domain: link.domain,
            safety: link.safety,
            created_at: link.created_at,
        }
    }
}

// ============================================================================
// Moderation Mappers
// ============================================================================

impl From<&AuditEntry> for AuditEntryResponse {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            action: entry.action.as_str(),
            comment: entry.comment.clone(),
            performed_by: entry.performer().to_string(),
            created_at: entry.created_at,
        }
    }
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self::from(&entry)
    }
}

fn skip_reason_str(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NotFound => "not_found",
        SkipReason::Deleted => "deleted",
    }
}

impl From<TransitionOutcome> for ModerationResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        match outcome {
            TransitionOutcome::Applied { report, audit } => Self {
                applied: true,
                skipped: None,
                report: Some(ReportResponse::from(report)),
                audit: Some(AuditEntryResponse::from(audit)),
            },
            TransitionOutcome::Skipped(reason) => Self {
                applied: false,
                skipped: Some(skip_reason_str(reason)),
                report: None,
                audit: None,
            },
        }
    }
}
