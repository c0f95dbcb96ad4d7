//! Audit entry entity - append-only record of a moderation action

use chrono::{DateTime, Utc};

use crate::value_objects::{AuditAction, AuditEntryId, Performer, ReportId};

/// Audit entry entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub report_id: ReportId,
    pub action: AuditAction,
    pub comment: Option<String>,
    /// `None` means the system performed the action
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn performer(&self) -> Performer {
        Performer::from_identity(self.performed_by.as_deref())
    }
}

/// Audit entry about to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub report_id: ReportId,
    pub action: AuditAction,
    pub comment: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewAuditEntry {
    /// Attach the store-assigned id
    pub fn into_entry(self, id: AuditEntryId) -> AuditEntry {
        AuditEntry {
            id,
            report_id: self.report_id,
            action: self.action,
            comment: self.comment,
            performed_by: self.performed_by,
            created_at: self.created_at,
        }
    }
}
