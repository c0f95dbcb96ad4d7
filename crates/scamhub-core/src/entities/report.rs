//! Report entity - a single scam report submitted by an end user

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Classification, ReportId, ReportType};

/// Report entity
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub report_type: ReportType,
    pub source_from: Option<String>,
    pub subject: Option<String>,
    pub message_content: String,
    pub received_at: Option<DateTime<Utc>>,
    /// Zone the reporter entered `received_at` in; display only
    pub received_at_tz: Option<String>,

    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,

    pub suggested_classification: Classification,
    pub classification: Classification,
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

impl Report {
    /// Build the initial state of a report from its submission
    pub fn from_new(id: ReportId, new: NewReport, now: DateTime<Utc>) -> Self {
        Self {
            id,
            report_type: new.report_type,
            source_from: new.source_from,
            subject: new.subject,
            message_content: new.message_content,
            received_at: new.received_at,
            received_at_tz: new.received_at_tz,
            reporter_name: new.reporter_name,
            reporter_contact: new.reporter_contact,
            suggested_classification: new.suggested_classification,
            classification: Classification::Unclassified,
            classified_by: None,
            classified_at: None,
            verified: false,
            verified_by: None,
            verified_at: None,
            flagged: false,
            flag_reason: None,
            flagged_by: None,
            flagged_at: None,
            deleted: false,
            deleted_at: None,
            reported_via: new.reported_via,
            ocr_preview: new.ocr_preview,
            spam_score: new.spam_score,
            contain_link: new.contain_link,
            created_at: now,
            updated_at: now,
        }
    }

    /// Visible to anonymous visitors: neither deleted nor flagged
    #[inline]
    pub fn is_public(&self) -> bool {
        !self.deleted && !self.flagged
    }

    /// Text scanned for links: message body followed by derived OCR text
    pub fn scan_text(&self) -> String {
        let ocr = self.ocr_preview.as_deref().unwrap_or_default();
        format!("{}\n{}", self.message_content, ocr)
    }

    /// Snapshot of the fields moderation is allowed to touch
    pub fn moderation_fields(&self) -> ModerationFields {
        ModerationFields {
            classification: self.classification.clone(),
            classified_by: self.classified_by.clone(),
            classified_at: self.classified_at,
            verified: self.verified,
            verified_by: self.verified_by.clone(),
            verified_at: self.verified_at,
            flagged: self.flagged,
            flag_reason: self.flag_reason.clone(),
            flagged_by: self.flagged_by.clone(),
            flagged_at: self.flagged_at,
            deleted: self.deleted,
            deleted_at: self.deleted_at,
            updated_at: self.updated_at,
        }
    }

    /// Overwrite the moderation fields, leaving content untouched
    pub fn apply_moderation_fields(&mut self, fields: ModerationFields) {
        self.classification = fields.classification;
        self.classified_by = fields.classified_by;
        self.classified_at = fields.classified_at;
        self.verified = fields.verified;
        self.verified_by = fields.verified_by;
        self.verified_at = fields.verified_at;
        self.flagged = fields.flagged;
        self.flag_reason = fields.flag_reason;
        self.flagged_by = fields.flagged_by;
        self.flagged_at = fields.flagged_at;
        self.deleted = fields.deleted;
        self.deleted_at = fields.deleted_at;
        self.updated_at = fields.updated_at;
    }
}

/// The subset of report columns a moderation transition may write
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationFields {
    pub classification: Classification,
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
    pub updated_at: DateTime<Utc>,
}

/// Submission payload for a new report
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub report_type: ReportType,
    pub source_from: Option<String>,
    pub subject: Option<String>,
    pub message_content: String,
    pub received_at: Option<DateTime<Utc>>,
    pub received_at_tz: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub suggested_classification: Classification,
    pub reported_via: Option<String>,
    pub ocr_preview: Option<String>,
    pub spam_score: Option<f64>,
    pub contain_link: bool,
}

impl NewReport {
    /// Minimal submission with every optional field absent
    pub fn new(report_type: ReportType, message_content: impl Into<String>) -> Self {
        Self {
            report_type,
            source_from: None,
            subject: None,
            message_content: message_content.into(),
            received_at: None,
            received_at_tz: None,
            reporter_name: None,
            reporter_contact: None,
            suggested_classification: Classification::Unclassified,
            reported_via: None,
            ocr_preview: None,
            spam_score: None,
            contain_link: false,
        }
    }

    /// Collapse blank optional text to `None` and check required fields
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        if self.message_content.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "message_content is required".to_string(),
            ));
        }

        for field in [
            &mut self.source_from,
            &mut self.subject,
            &mut self.received_at_tz,
            &mut self.reporter_name,
            &mut self.reporter_contact,
            &mut self.reported_via,
            &mut self.ocr_preview,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }

        Ok(self)
    }
}
