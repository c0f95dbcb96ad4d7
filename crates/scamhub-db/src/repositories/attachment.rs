//! AttachmentRepository for PgReportStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use scamhub_core::entities::{Attachment, NewAttachment, Report};
use scamhub_core::traits::{AttachmentRepository, RepoResult};
use scamhub_core::value_objects::{AttachmentId, ReportId};

use crate::models::{AttachmentModel, ReportModel, REPORT_COLUMNS};

use super::error::{map_db_error, map_fk_violation, report_not_found};
use super::PgReportStore;

#[async_trait]
impl AttachmentRepository for PgReportStore {
    #[instrument(skip(self, attachment))]
    async fn create(
        &self,
        report_id: ReportId,
        attachment: &NewAttachment,
        now: DateTime<Utc>,
    ) -> RepoResult<Attachment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Hold the parent row so a concurrent delete cannot interleave.
        let live: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT NOT deleted FROM reports WHERE id = $1 FOR SHARE
            "#,
        )
        .bind(report_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if live != Some(true) {
            return Err(report_not_found(report_id));
        }

        let model = sqlx::query_as::<_, AttachmentModel>(
            r#"
            INSERT INTO attachments (report_id, original_name, storage_path, mime_type, size_bytes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, report_id, original_name, storage_path, mime_type, size_bytes, created_at, deleted
            "#,
        )
        .bind(report_id.into_inner())
        .bind(&attachment.original_name)
        .bind(&attachment.storage_path)
        .bind(&attachment.mime_type)
        .bind(attachment.size_bytes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_fk_violation(e, || report_not_found(report_id)))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Attachment::from(model))
    }

    #[instrument(skip(self))]
    async fn find_with_report(&self, id: AttachmentId) -> RepoResult<Option<(Attachment, Report)>> {
        let attachment = sqlx::query_as::<_, AttachmentModel>(
            r#"
            SELECT id, report_id, original_name, storage_path, mime_type, size_bytes, created_at, deleted
            FROM attachments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(attachment) = attachment else {
            return Ok(None);
        };

        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1");
        let report = sqlx::query_as::<_, ReportModel>(&sql)
            .bind(attachment.report_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match report {
            Some(report) => Ok(Some((Attachment::from(attachment), Report::try_from(report)?))),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, report_ids), fields(reports = report_ids.len()))]
    async fn find_visible_by_reports(&self, report_ids: &[ReportId]) -> RepoResult<Vec<Attachment>> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = report_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, AttachmentModel>(
            r#"
            SELECT a.id, a.report_id, a.original_name, a.storage_path, a.mime_type,
                   a.size_bytes, a.created_at, a.deleted
            FROM attachments a
            JOIN reports r ON r.id = a.report_id
            WHERE a.report_id = ANY($1)
              AND NOT a.deleted
              AND NOT r.deleted
              AND NOT r.flagged
            ORDER BY a.report_id, a.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Attachment::from).collect())
    }
}
