//! Attachment entity - a file uploaded alongside a report

use chrono::{DateTime, Utc};

use crate::value_objects::{AttachmentId, ReportId};

use super::Report;

/// Attachment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub report_id: ReportId,
    pub original_name: String,
    /// Opaque blob locator
    pub storage_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

impl Attachment {
    /// An attachment is served only while it and its parent report are
    /// live and the parent is not flagged.
    pub fn is_visible_with(&self, parent: &Report) -> bool {
        !self.deleted && parent.id == self.report_id && parent.is_public()
    }

    /// MIME type to serve the file with
    pub fn content_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or("application/octet-stream")
    }

    /// Check if attachment is an image
    pub fn is_image(&self) -> bool {
        self.content_type().starts_with("image/")
    }
}

/// Metadata for a file that has already been written to blob storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub original_name: String,
    pub storage_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
}
