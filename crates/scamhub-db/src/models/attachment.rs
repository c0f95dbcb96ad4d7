//! Attachment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for attachments table
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentModel {
    pub id: i64,
    pub report_id: i64,
    pub original_name: String,
    pub storage_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}
