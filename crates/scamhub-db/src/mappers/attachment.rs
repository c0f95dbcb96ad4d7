//! Attachment entity <-> model mapper

use scamhub_core::entities::Attachment;
use scamhub_core::value_objects::{AttachmentId, ReportId};

use crate::models::AttachmentModel;

/// Convert AttachmentModel to Attachment entity
impl From<AttachmentModel> for Attachment {
    fn from(model: AttachmentModel) -> Self {
        Attachment {
            id: AttachmentId::new(model.id),
            report_id: ReportId::new(model.report_id),
            original_name: model.original_name,
            storage_path: model.storage_path,
            mime_type: model.mime_type,
            size_bytes: model.size_bytes,
            created_at: model.created_at,
            deleted: model.deleted,
        }
    }
}
