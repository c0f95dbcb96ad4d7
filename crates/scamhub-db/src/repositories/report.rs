//! ReportRepository for PgReportStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, instrument};

use scamhub_core::entities::{AuditEntry, NewReport, Report};
use scamhub_core::moderation::{plan_transition, ModerationCommand, TransitionOutcome};
use scamhub_core::query::{
    total_pages, AdminPage, AdminSearch, PublicSearch, ReportCounters, ReportFilter,
    ADMIN_PAGE_SIZE,
};
use scamhub_core::traits::{RepoResult, ReportRepository};
use scamhub_core::value_objects::ReportId;

use crate::mappers::{ModerationUpdate, ReportInsert};
use crate::models::{AuditEntryModel, ReportModel, REPORT_COLUMNS};

use super::error::map_db_error;
use super::PgReportStore;

/// Append the WHERE clause for `filter`
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ReportFilter) {
    if filter.include_deleted {
        qb.push(" WHERE TRUE");
    } else {
        qb.push(" WHERE NOT deleted");
    }
    if let Some(flagged) = filter.flagged {
        qb.push(" AND flagged = ").push_bind(flagged);
    }
    if let Some(report_type) = filter.report_type {
        qb.push(" AND report_type = ").push_bind(report_type.as_str());
    }
    if let Some(pattern) = filter.like_pattern() {
        qb.push(" AND (message_content ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR source_from ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR subject ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

fn into_reports(models: Vec<ReportModel>) -> RepoResult<Vec<Report>> {
    models.into_iter().map(Report::try_from).collect()
}

#[async_trait]
impl ReportRepository for PgReportStore {
    #[instrument(skip(self, report), fields(report_type = %report.report_type))]
    async fn create(&self, report: &NewReport, now: DateTime<Utc>) -> RepoResult<Report> {
        let insert = ReportInsert::new(report);
        let sql = format!(
            r#"
            INSERT INTO reports (
                report_type, source_from, subject, message_content,
                received_at, received_at_tz, reporter_name, reporter_contact,
                suggested_classification, reported_via, ocr_preview, spam_score,
                contain_link, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING {REPORT_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, ReportModel>(&sql)
            .bind(insert.report_type)
            .bind(&report.source_from)
            .bind(&report.subject)
            .bind(&report.message_content)
            .bind(report.received_at)
            .bind(&report.received_at_tz)
            .bind(&report.reporter_name)
            .bind(&report.reporter_contact)
            .bind(insert.suggested_classification)
            .bind(&report.reported_via)
            .bind(&report.ocr_preview)
            .bind(report.spam_score)
            .bind(report.contain_link)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Report::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReportId, include_deleted: bool) -> RepoResult<Option<Report>> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 AND ($2 OR NOT deleted)");

        let result = sqlx::query_as::<_, ReportModel>(&sql)
            .bind(id.into_inner())
            .bind(include_deleted)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Report::try_from).transpose()
    }

    #[instrument(skip(self, command), fields(action = %command.action.audit_action()))]
    async fn apply_moderation(
        &self,
        id: ReportId,
        command: &ModerationCommand,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let select = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, ReportModel>(&select)
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .map(Report::try_from)
            .transpose()?;

        let plan = match plan_transition(current.as_ref(), command, now) {
            Ok(plan) => plan,
            Err(reason) => {
                // Nothing was written; release the row lock.
                tx.rollback().await.map_err(map_db_error)?;
                debug!(report_id = %id, ?reason, "Moderation skipped");
                return Ok(TransitionOutcome::Skipped(reason));
            }
        };

        let update = ModerationUpdate::new(&plan.fields);
        let update_sql = format!(
            r#"
            UPDATE reports SET
                classification = $2, classified_by = $3, classified_at = $4,
                verified = $5, verified_by = $6, verified_at = $7,
                flagged = $8, flag_reason = $9, flagged_by = $10, flagged_at = $11,
                deleted = $12, deleted_at = $13, updated_at = $14
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        );
        let fields = update.fields;
        let report_model = sqlx::query_as::<_, ReportModel>(&update_sql)
            .bind(id.into_inner())
            .bind(update.classification)
            .bind(&fields.classified_by)
            .bind(fields.classified_at)
            .bind(fields.verified)
            .bind(&fields.verified_by)
            .bind(fields.verified_at)
            .bind(fields.flagged)
            .bind(&fields.flag_reason)
            .bind(&fields.flagged_by)
            .bind(fields.flagged_at)
            .bind(fields.deleted)
            .bind(fields.deleted_at)
            .bind(fields.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let audit_model = sqlx::query_as::<_, AuditEntryModel>(
            r#"
            INSERT INTO report_audit (report_id, action, comment, performed_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, report_id, action, comment, performed_by, created_at
            "#,
        )
        .bind(plan.audit.report_id.into_inner())
        .bind(plan.audit.action.as_str())
        .bind(&plan.audit.comment)
        .bind(&plan.audit.performed_by)
        .bind(plan.audit.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(TransitionOutcome::Applied {
            report: Report::try_from(report_model)?,
            audit: AuditEntry::try_from(audit_model)?,
        })
    }

    #[instrument(skip(self))]
    async fn search_public(&self, search: &PublicSearch) -> RepoResult<Vec<Report>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {REPORT_COLUMNS} FROM reports"));
        push_filter(&mut qb, &search.filter());
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(search.limit());

        let models = qb
            .build_query_as::<ReportModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_reports(models)
    }

    #[instrument(skip(self))]
    async fn search_admin(&self, search: &AdminSearch) -> RepoResult<AdminPage> {
        let filter = search.filter();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reports");
        push_filter(&mut count, &filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {REPORT_COLUMNS} FROM reports"));
        push_filter(&mut rows, &filter);
        rows.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(ADMIN_PAGE_SIZE)
            .push(" OFFSET ")
            .push_bind(search.offset());
        let models = rows
            .build_query_as::<ReportModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let (total_all, total_flagged, total_deleted) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE flagged),
                COUNT(*) FILTER (WHERE deleted)
            FROM reports
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AdminPage {
            reports: into_reports(models)?,
            total,
            total_pages: total_pages(total, ADMIN_PAGE_SIZE),
            page: search.page(),
            counters: ReportCounters {
                total_all,
                total_flagged,
                total_deleted,
            },
        })
    }

    #[instrument(skip(self))]
    async fn find_link_candidates(&self, limit: i64) -> RepoResult<Vec<Report>> {
        let sql = format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE contain_link AND NOT deleted
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#
        );

        let models = sqlx::query_as::<_, ReportModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_reports(models)
    }
}
