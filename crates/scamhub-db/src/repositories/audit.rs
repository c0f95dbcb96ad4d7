//! AuditRepository for PgReportStore

use async_trait::async_trait;
use tracing::instrument;

use scamhub_core::entities::AuditEntry;
use scamhub_core::traits::{AuditRepository, RepoResult};
use scamhub_core::value_objects::ReportId;

use crate::models::AuditEntryModel;

use super::error::map_db_error;
use super::PgReportStore;

#[async_trait]
impl AuditRepository for PgReportStore {
    #[instrument(skip(self))]
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<AuditEntry>> {
        let results = sqlx::query_as::<_, AuditEntryModel>(
            r#"
            SELECT id, report_id, action, comment, performed_by, created_at
            FROM report_audit
            WHERE report_id = $1
            ORDER BY id
            "#,
        )
        .bind(report_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AuditEntry::try_from).collect()
    }
}
