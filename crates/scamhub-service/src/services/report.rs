//! Report service
//!
//! Handles report intake, attachments and single-report reads.

use scamhub_core::entities::{NewAttachment, NewReport};
use scamhub_core::links::find_candidates;
use scamhub_core::time::{parse_received_at, resolve_local, Normalized};
use scamhub_core::value_objects::{Classification, ReportId, ReportType};
use scamhub_core::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AttachFileRequest, AttachmentResponse, CreateReportRequest, ReportResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Stands in for the blob locator while an upload is validated
const PENDING_LOCATOR: &str = "pending";

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a new report
    ///
    /// Creation itself is not audited.
    #[instrument(skip(self, request), fields(report_type = %request.report_type))]
    pub async fn create_report(&self, request: CreateReportRequest) -> ServiceResult<ReportResponse> {
        request.validate()?;

        let report_type: ReportType = request.report_type.parse()?;
        let suggested_classification = match request.suggested_classification.as_deref() {
            Some(label) if !label.trim().is_empty() => Classification::parse(label)?,
            _ => Classification::Unclassified,
        };

        let tz = request.received_at_tz.as_deref();
        let received = match (&request.received_local, request.received_at.as_deref()) {
            (Some(local), _) => Some(resolve_local(local.date.and_time(local.time), tz)),
            (None, Some(raw)) => {
                let parsed = parse_received_at(raw, tz);
                if parsed.is_none() {
                    warn!(received_at = raw, "Unparseable received_at dropped");
                }
                parsed
            }
            (None, None) => None,
        };
        if let Some(Normalized {
            zone_resolved: false,
            ..
        }) = received
        {
            if let Some(zone) = tz.filter(|z| !z.trim().is_empty()) {
                warn!(zone, "Unknown timezone, local time stored as UTC");
            }
        }

        let mut new = NewReport::new(report_type, request.message_content);
        new.source_from = request.source_from;
        new.subject = request.subject;
        new.received_at = received.map(|n| n.instant);
        new.received_at_tz = request.received_at_tz;
        new.reporter_name = request.reporter_name;
        new.reporter_contact = request.reporter_contact;
        new.suggested_classification = suggested_classification;
        new.reported_via = request.reported_via;
        new.ocr_preview = request.ocr_preview;
        new.spam_score = request.spam_score;
        let mut new = new.normalized()?;

        let scanned = format!(
            "{}\n{}",
            new.message_content,
            new.ocr_preview.as_deref().unwrap_or_default()
        );
        new.contain_link = request.contain_link || !find_candidates(&scanned).is_empty();

        let report = self.ctx.report_repo().create(&new, self.ctx.now()).await?;

        info!(report_id = %report.id, contain_link = report.contain_link, "Report created");

        Ok(ReportResponse::from(report))
    }

    /// Record a file that is already in blob storage
    #[instrument(skip(self, request))]
    pub async fn attach_file(
        &self,
        report_id: ReportId,
        request: AttachFileRequest,
    ) -> ServiceResult<AttachmentResponse> {
        request.validate()?;

        let attachment = NewAttachment {
            original_name: request.original_name,
            storage_path: request.storage_path,
            mime_type: request.mime_type.filter(|m| !m.trim().is_empty()),
            size_bytes: request.size_bytes,
        };
        let created = self
            .ctx
            .attachment_repo()
            .create(report_id, &attachment, self.ctx.now())
            .await?;

        info!(report_id = %report_id, attachment_id = %created.id, "Attachment recorded");

        Ok(AttachmentResponse::from(created))
    }

    /// Store uploaded bytes and record them as an attachment
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_attachment(
        &self,
        report_id: ReportId,
        bytes: &[u8],
        original_name: &str,
        mime_type: Option<&str>,
    ) -> ServiceResult<AttachmentResponse> {
        let max_bytes = self.ctx.storage().max_file_size_bytes();
        if bytes.len() as u64 > max_bytes {
            return Err(DomainError::FileTooLarge { max_bytes }.into());
        }

        let mut request = AttachFileRequest {
            original_name: original_name.to_string(),
            storage_path: PENDING_LOCATOR.to_string(),
            mime_type: mime_type.map(str::to_string),
            size_bytes: bytes.len() as i64,
        };
        request.validate()?;

        // Refuse before writing a blob nobody will reference.
        if self.ctx.report_repo().find_by_id(report_id, false).await?.is_none() {
            return Err(DomainError::ReportNotFound(report_id).into());
        }

        let blob = self.ctx.blob_store().put(bytes, original_name).await?;
        request.storage_path = blob.locator.clone();
        request.size_bytes = blob.size_bytes;

        match self.attach_file(report_id, request).await {
            Ok(attachment) => Ok(attachment),
            Err(e) => {
                // The report can vanish between the check and the insert.
                if let Err(cleanup) = self.ctx.blob_store().delete(&blob.locator).await {
                    warn!(locator = %blob.locator, error = %cleanup, "Orphaned blob not removed");
                }
                Err(e)
            }
        }
    }

    /// Get a report by ID
    ///
    /// Soft-deleted reports are returned only when `include_deleted` is set.
    #[instrument(skip(self))]
    pub async fn get_report(
        &self,
        id: ReportId,
        include_deleted: bool,
    ) -> ServiceResult<ReportResponse> {
        let report = self
            .ctx
            .report_repo()
            .find_by_id(id, include_deleted)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", id.to_string()))?;

        let attachments = self
            .ctx
            .attachment_repo()
            .find_visible_by_reports(&[id])
            .await?;

        Ok(ReportResponse::from(report)
            .with_attachments(attachments.iter().map(AttachmentResponse::from).collect()))
    }

    /// Get a report the way an anonymous visitor may see it
    #[instrument(skip(self))]
    pub async fn get_public_report(&self, id: ReportId) -> ServiceResult<ReportResponse> {
        let report = self.get_report(id, false).await?;
        if report.flagged {
            return Err(ServiceError::not_found("Report", id.to_string()));
        }
        Ok(report)
    }
}
