//! LinkRepository for PgReportStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use scamhub_core::entities::{Link, NewLink};
use scamhub_core::traits::{LinkRepository, RepoResult};
use scamhub_core::value_objects::ReportId;

use crate::models::LinkModel;

use super::error::{map_db_error, map_fk_violation, report_not_found};
use super::PgReportStore;

#[async_trait]
impl LinkRepository for PgReportStore {
    #[instrument(skip(self))]
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<Link>> {
        let results = sqlx::query_as::<_, LinkModel>(
            r#"
            SELECT id, report_id, url, domain, safety, created_at, deleted
            FROM report_links
            WHERE report_id = $1 AND NOT deleted
            ORDER BY id
            "#,
        )
        .bind(report_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self, links), fields(candidates = links.len()))]
    async fn insert_missing(
        &self,
        report_id: ReportId,
        links: &[NewLink],
        now: DateTime<Utc>,
    ) -> RepoResult<u64> {
        if links.is_empty() {
            return Ok(0);
        }
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        let domains: Vec<&str> = links.iter().map(|l| l.domain.as_str()).collect();

        // The partial unique index makes concurrent extractions converge.
        let result = sqlx::query(
            r#"
            INSERT INTO report_links (report_id, url, domain, created_at)
            SELECT $1, u.url, u.domain, $4
            FROM UNNEST($2::text[], $3::text[]) AS u(url, domain)
            ON CONFLICT (report_id, url) WHERE NOT deleted DO NOTHING
            "#,
        )
        .bind(report_id.into_inner())
        .bind(urls)
        .bind(domains)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || report_not_found(report_id)))?;

        Ok(result.rows_affected())
    }
}
