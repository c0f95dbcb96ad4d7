//! Audit trail database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for report_audit table
#[derive(Debug, Clone, FromRow)]
pub struct AuditEntryModel {
    pub id: i64,
    pub report_id: i64,
    pub action: String,
    pub comment: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
