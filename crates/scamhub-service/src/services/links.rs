//! Link extraction service
//!
//! Scans report text for URL-like tokens and records each distinct one
//! once per report. Re-running an extraction only counts duplicates.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use scamhub_core::entities::Report;
use scamhub_core::links::{plan_insertions, ExtractionSummary};
use scamhub_core::value_objects::ReportId;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::dto::{ExtractionResponse, LinkResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Totals from one batch sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Reports examined
    pub reports: u64,
    pub inserted: u64,
    pub skipped: u64,
    /// Reports whose extraction failed
    pub failed: u64,
}

/// Link extraction service
pub struct LinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LinkService<'a> {
    /// Create a new LinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Extract links from one live report
    #[instrument(skip(self))]
    pub async fn extract_links(&self, report_id: ReportId) -> ServiceResult<ExtractionResponse> {
        let report = self
            .ctx
            .report_repo()
            .find_by_id(report_id, false)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", report_id.to_string()))?;

        let summary = self.extract_from(&report).await?;

        info!(
            report_id = %report_id,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "Links extracted"
        );

        Ok(ExtractionResponse {
            report_id: report_id.into_inner(),
            inserted: summary.inserted,
            skipped: summary.skipped,
        })
    }

    async fn extract_from(&self, report: &Report) -> ServiceResult<ExtractionSummary> {
        let existing: HashSet<String> = self
            .ctx
            .link_repo()
            .find_by_report(report.id)
            .await?
            .into_iter()
            .map(|link| link.url)
            .collect();

        let plan = plan_insertions(&report.scan_text(), &existing);
        if plan.to_insert.is_empty() {
            return Ok(ExtractionSummary {
                inserted: 0,
                skipped: plan.skipped,
            });
        }

        let planned = plan.to_insert.len() as u64;
        let inserted = self
            .ctx
            .link_repo()
            .insert_missing(report.id, &plan.to_insert, self.ctx.now())
            .await?;

        // A concurrent extraction may have recorded some of them first.
        Ok(ExtractionSummary {
            inserted,
            skipped: plan.skipped + planned.saturating_sub(inserted),
        })
    }

    /// Run extraction over the newest link-bearing reports.
    ///
    /// A failing report is logged and counted; the sweep carries on.
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> ServiceResult<SweepSummary> {
        let settings = self.ctx.link_sweep();
        let reports = self
            .ctx
            .report_repo()
            .find_link_candidates(settings.batch_size)
            .await?;

        debug!(candidates = reports.len(), "Starting link sweep");

        let summary = stream::iter(reports.iter())
            .map(|report| async move { (report.id, self.extract_from(report).await) })
            .buffer_unordered(settings.concurrency.max(1))
            .fold(SweepSummary::default(), |mut acc, (id, result)| async move {
                acc.reports += 1;
                match result {
                    Ok(found) => {
                        acc.inserted += found.inserted;
                        acc.skipped += found.skipped;
                    }
                    Err(e) => {
                        warn!(report_id = %id, error = %e, "Link extraction failed");
                        acc.failed += 1;
                    }
                }
                acc
            })
            .await;

        info!(
            reports = summary.reports,
            inserted = summary.inserted,
            skipped = summary.skipped,
            failed = summary.failed,
            "Link sweep finished"
        );

        Ok(summary)
    }

    /// Links recorded for a report
    pub async fn links_for(&self, report_id: ReportId) -> ServiceResult<Vec<LinkResponse>> {
        let links = self.ctx.link_repo().find_by_report(report_id).await?;
        Ok(links.into_iter().map(LinkResponse::from).collect())
    }
}
