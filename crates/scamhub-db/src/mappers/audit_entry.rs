//! Audit entry entity <-> model mapper

use scamhub_core::entities::AuditEntry;
use scamhub_core::error::DomainError;
use scamhub_core::value_objects::{AuditEntryId, ReportId};

use crate::models::AuditEntryModel;

/// Convert AuditEntryModel to AuditEntry entity
impl TryFrom<AuditEntryModel> for AuditEntry {
    type Error = DomainError;

    fn try_from(model: AuditEntryModel) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: AuditEntryId::new(model.id),
            report_id: ReportId::new(model.report_id),
            action: model.action.parse().map_err(|_| {
                DomainError::StorageUnavailable(format!(
                    "audit entry {} has unknown action {:?}",
                    model.id, model.action
                ))
            })?,
            comment: model.comment,
            performed_by: model.performed_by,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scamhub_core::value_objects::{AuditAction, Performer};

    #[test]
    fn test_model_to_entity() {
        let entry = AuditEntry::try_from(AuditEntryModel {
            id: 3,
            report_id: 9,
            action: "unflag".to_string(),
            comment: None,
            performed_by: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert_eq!(entry.action, AuditAction::Unflag);
        assert_eq!(entry.performer(), Performer::System);
    }
}
