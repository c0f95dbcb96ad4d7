//! Attachment access
//!
//! Files are served only while they are visible with their parent report.

use scamhub_core::value_objects::AttachmentId;
use tracing::{instrument, warn};

use crate::dto::{AttachmentDownload, AttachmentResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attachment service
pub struct AttachmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttachmentService<'a> {
    /// Create a new AttachmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load an attachment's bytes for download.
    ///
    /// Hidden attachments are indistinguishable from missing ones.
    #[instrument(skip(self))]
    pub async fn open(&self, id: AttachmentId) -> ServiceResult<AttachmentDownload> {
        let not_found = || ServiceError::not_found("Attachment", id.to_string());

        let (attachment, report) = self
            .ctx
            .attachment_repo()
            .find_with_report(id)
            .await?
            .ok_or_else(not_found)?;
        if !attachment.is_visible_with(&report) {
            return Err(not_found());
        }

        let bytes = match self.ctx.blob_store().get(&attachment.storage_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                warn!(attachment_id = %id, locator = %attachment.storage_path, "Attachment blob missing");
                return Err(not_found());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(AttachmentDownload {
            attachment: AttachmentResponse::from(attachment),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{AttachFileRequest, CreateReportRequest};
    use crate::services::moderation::ModerationService;
    use crate::services::report::ReportService;
    use crate::services::testing::{alice, fixture, Fixture};
    use scamhub_core::value_objects::ReportId;

    async fn seed_with_file(fx: &Fixture) -> (ReportId, AttachmentId) {
        let reports = ReportService::new(&fx.ctx);
        let report = reports
            .create_report(CreateReportRequest::new("email", "invoice attached"))
            .await
            .unwrap();
        let report_id = ReportId::new(report.id);
        let attachment = reports
            .upload_attachment(report_id, b"%PDF-1.7", "invoice.pdf", Some("application/pdf"))
            .await
            .unwrap();
        (report_id, AttachmentId::new(attachment.id))
    }

    #[tokio::test]
    async fn test_open_visible_attachment() {
        let fx = fixture();
        let (_, id) = seed_with_file(&fx).await;

        let download = AttachmentService::new(&fx.ctx).open(id).await.unwrap();
        assert_eq!(download.bytes, b"%PDF-1.7");
        assert_eq!(download.attachment.content_type, "application/pdf");
        assert!(!download.attachment.is_image);
    }

    #[tokio::test]
    async fn test_flagged_or_deleted_parent_hides_attachment() {
        let fx = fixture();
        let (report_id, id) = seed_with_file(&fx).await;
        let moderation = ModerationService::new(&fx.ctx);
        let service = AttachmentService::new(&fx.ctx);

        moderation.flag(report_id, alice(), None).await.unwrap();
        assert!(service.open(id).await.unwrap_err().is_not_found());

        moderation.unflag(report_id, alice()).await.unwrap();
        assert!(service.open(id).await.is_ok());

        moderation.delete(report_id, alice()).await.unwrap();
        assert!(service.open(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let fx = fixture();
        let report = ReportService::new(&fx.ctx)
            .create_report(CreateReportRequest::new("sms", "orphan"))
            .await
            .unwrap();
        let attachment = ReportService::new(&fx.ctx)
            .attach_file(
                ReportId::new(report.id),
                AttachFileRequest {
                    original_name: "lost.txt".to_string(),
                    storage_path: "0000.txt".to_string(),
                    mime_type: None,
                    size_bytes: 4,
                },
            )
            .await
            .unwrap();

        let err = AttachmentService::new(&fx.ctx)
            .open(AttachmentId::new(attachment.id))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(AttachmentService::new(&fx.ctx)
            .open(AttachmentId::new(999))
            .await
            .unwrap_err()
            .is_not_found());
    }
}
