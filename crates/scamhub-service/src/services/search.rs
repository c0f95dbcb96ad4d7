//! Search service
//!
//! Public listing for anonymous visitors and the paged moderator listing.

use std::collections::HashMap;

use scamhub_core::entities::Report;
use scamhub_core::query::{AdminSearch, PublicSearch, StatusFilter, ADMIN_PAGE_SIZE};
use scamhub_core::value_objects::{ReportId, ReportType};
use tracing::{debug, instrument};
use validator::Validate;

use crate::dto::{
    AdminSearchRequest, AdminSearchResponse, AttachmentResponse, PublicSearchRequest,
    PublicSearchResponse, ReportResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest public reports matching the text and type filters
    #[instrument(skip(self, request))]
    pub async fn public_search(
        &self,
        request: PublicSearchRequest,
    ) -> ServiceResult<PublicSearchResponse> {
        request.validate()?;

        let search = PublicSearch {
            text: request.q,
            report_type: parse_report_type(request.report_type.as_deref())?,
        };
        let reports = self.ctx.report_repo().search_public(&search).await?;

        debug!(count = reports.len(), "Public search");

        Ok(PublicSearchResponse {
            reports: self.with_attachments(reports).await?,
            limit: search.limit(),
        })
    }

    /// One page of the moderator listing with dashboard counters
    #[instrument(skip(self, request))]
    pub async fn admin_search(
        &self,
        request: AdminSearchRequest,
    ) -> ServiceResult<AdminSearchResponse> {
        request.validate()?;

        let status = match request.status.as_deref() {
            Some(raw) => raw.parse::<StatusFilter>()?,
            None => StatusFilter::All,
        };
        let search = AdminSearch {
            text: request.q,
            report_type: parse_report_type(request.report_type.as_deref())?,
            status,
            show_deleted: request.show_deleted,
            page: request.page.unwrap_or(1),
        };
        let page = self.ctx.report_repo().search_admin(&search).await?;

        debug!(total = page.total, page = page.page, "Admin search");

        Ok(AdminSearchResponse {
            reports: self.with_attachments(page.reports).await?,
            page: page.page,
            page_size: ADMIN_PAGE_SIZE,
            total: page.total,
            total_pages: page.total_pages,
            total_all: page.counters.total_all,
            total_flagged: page.counters.total_flagged,
            total_deleted: page.counters.total_deleted,
        })
    }

    async fn with_attachments(&self, reports: Vec<Report>) -> ServiceResult<Vec<ReportResponse>> {
        if reports.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ReportId> = reports.iter().map(|r| r.id).collect();
        let mut grouped: HashMap<ReportId, Vec<AttachmentResponse>> = HashMap::new();
        for attachment in self
            .ctx
            .attachment_repo()
            .find_visible_by_reports(&ids)
            .await?
        {
            grouped
                .entry(attachment.report_id)
                .or_default()
                .push(AttachmentResponse::from(attachment));
        }

        Ok(reports
            .into_iter()
            .map(|report| {
                let attachments = grouped.remove(&report.id).unwrap_or_default();
                ReportResponse::from(report).with_attachments(attachments)
            })
            .collect())
    }
}

/// Blank or `all` means no type filter
fn parse_report_type(raw: Option<&str>) -> ServiceResult<Option<ReportType>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => Ok(Some(value.parse::<ReportType>()?)),
    }
}
