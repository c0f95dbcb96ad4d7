//! Report entity <-> model mapper

use scamhub_core::entities::{ModerationFields, NewReport, Report};
use scamhub_core::error::DomainError;
use scamhub_core::value_objects::{Classification, ReportId};

use crate::models::ReportModel;

/// Convert ReportModel to Report entity.
///
/// Fails only if the stored report type is outside the known set.
impl TryFrom<ReportModel> for Report {
    type Error = DomainError;

    fn try_from(model: ReportModel) -> Result<Self, Self::Error> {
        Ok(Report {
            id: ReportId::new(model.id),
            report_type: model.report_type.parse().map_err(|_| {
                DomainError::StorageUnavailable(format!(
                    "report {} has unknown type {:?}",
                    model.id, model.report_type
                ))
            })?,
            source_from: model.source_from,
            subject: model.subject,
            message_content: model.message_content,
            received_at: model.received_at,
            received_at_tz: model.received_at_tz,
            reporter_name: model.reporter_name,
            reporter_contact: model.reporter_contact,
            suggested_classification: Classification::from_stored(&model.suggested_classification),
            classification: Classification::from_stored(&model.classification),
            classified_by: model.classified_by,
            classified_at: model.classified_at,
            verified: model.verified,
            verified_by: model.verified_by,
            verified_at: model.verified_at,
            flagged: model.flagged,
            flag_reason: model.flag_reason,
            flagged_by: model.flagged_by,
            flagged_at: model.flagged_at,
            deleted: model.deleted,
            deleted_at: model.deleted_at,
            reported_via: model.reported_via,
            ocr_preview: model.ocr_preview,
            spam_score: model.spam_score,
            contain_link: model.contain_link,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values of a new report prepared for insertion
pub struct ReportInsert<'a> {
    pub report_type: &'static str,
    pub suggested_classification: &'a str,
    pub report: &'a NewReport,
}

impl<'a> ReportInsert<'a> {
    pub fn new(report: &'a NewReport) -> Self {
        Self {
            report_type: report.report_type.as_str(),
            suggested_classification: report.suggested_classification.as_str(),
            report,
        }
    }
}

/// Moderation columns prepared for an `UPDATE`
pub struct ModerationUpdate<'a> {
    pub classification: &'a str,
    pub fields: &'a ModerationFields,
}

impl<'a> ModerationUpdate<'a> {
    pub fn new(fields: &'a ModerationFields) -> Self {
        Self {
            classification: fields.classification.as_str(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scamhub_core::value_objects::ReportType;

    fn model() -> ReportModel {
        let now = Utc::now();
        ReportModel {
            id: 7,
            report_type: "email".to_string(),
            source_from: Some("bank@phish.test".to_string()),
            subject: Some("Account locked".to_string()),
            message_content: "Verify now".to_string(),
            received_at: None,
            received_at_tz: None,
            reporter_name: None,
            reporter_contact: None,
            suggested_classification: "phishing".to_string(),
            classification: "bank impersonation".to_string(),
            classified_by: Some("alice".to_string()),
            classified_at: Some(now),
            verified: false,
            verified_by: None,
            verified_at: None,
            flagged: true,
            flag_reason: Some("phishing".to_string()),
            flagged_by: Some("alice".to_string()),
            flagged_at: Some(now),
            deleted: false,
            deleted_at: None,
            reported_via: Some("web".to_string()),
            ocr_preview: None,
            spam_score: Some(0.9),
            contain_link: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_model_to_entity() {
        let report = Report::try_from(model()).unwrap();
        assert_eq!(report.id, ReportId::new(7));
        assert_eq!(report.report_type, ReportType::Email);
        assert_eq!(report.suggested_classification, Classification::Phishing);
        assert_eq!(
            report.classification,
            Classification::Other("bank impersonation".to_string())
        );
        assert!(report.flagged);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut bad = model();
        bad.report_type = "fax".to_string();
        assert!(Report::try_from(bad).unwrap_err().is_storage());
    }

    #[test]
    fn test_insert_values() {
        let new = NewReport::new(ReportType::Call, "Press 1 to claim");
        let insert = ReportInsert::new(&new);
        assert_eq!(insert.report_type, "call");
        assert_eq!(insert.suggested_classification, "unclassified");
    }
}
