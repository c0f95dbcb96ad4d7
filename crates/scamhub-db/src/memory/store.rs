use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use scamhub_core::entities::{Attachment, AuditEntry, Link, NewAttachment, NewLink, NewReport, Report};
use scamhub_core::moderation::{plan_transition, ModerationCommand, TransitionOutcome};
use scamhub_core::query::{
    total_pages, AdminPage, AdminSearch, PublicSearch, ReportCounters, ADMIN_PAGE_SIZE,
};
use scamhub_core::traits::{
    AttachmentRepository, AuditRepository, LinkRepository, RepoResult, ReportRepository,
};
use scamhub_core::value_objects::{AttachmentId, AuditEntryId, LinkId, ReportId};
use scamhub_core::DomainError;

#[derive(Default)]
struct State {
    reports: BTreeMap<i64, Report>,
    attachments: BTreeMap<i64, Attachment>,
    links: Vec<Link>,
    audit: Vec<AuditEntry>,
    next_report: i64,
    next_attachment: i64,
    next_link: i64,
    next_audit: i64,
}

fn bump(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl State {
    /// Reports matching `keep`, newest first
    fn newest_first<F>(&self, keep: F) -> Vec<&Report>
    where
        F: Fn(&Report) -> bool,
    {
        let mut rows: Vec<&Report> = self.reports.values().filter(|r| keep(*r)).collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

/// In-memory report store. Suitable for development and testing.
///
/// Every operation runs under one mutex, so moderation transitions and
/// their audit entries are applied atomically with respect to each other.
#[derive(Default)]
pub struct MemoryReportStore {
    state: Mutex<State>,
}

impl MemoryReportStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for MemoryReportStore {
    async fn create(&self, report: &NewReport, now: DateTime<Utc>) -> RepoResult<Report> {
        let mut state = self.state.lock();
        let id = ReportId::new(bump(&mut state.next_report));
        let created = Report::from_new(id, report.clone(), now);
        state.reports.insert(id.into_inner(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ReportId, include_deleted: bool) -> RepoResult<Option<Report>> {
        let state = self.state.lock();
        Ok(state
            .reports
            .get(&id.into_inner())
            .filter(|r| include_deleted || !r.deleted)
            .cloned())
    }

    async fn apply_moderation(
        &self,
        id: ReportId,
        command: &ModerationCommand,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionOutcome> {
        let mut state = self.state.lock();

        let plan = match plan_transition(state.reports.get(&id.into_inner()), command, now) {
            Ok(plan) => plan,
            Err(reason) => return Ok(TransitionOutcome::Skipped(reason)),
        };

        let audit_id = AuditEntryId::new(bump(&mut state.next_audit));
        let audit = plan.audit.into_entry(audit_id);

        let report = state
            .reports
            .get_mut(&id.into_inner())
            .ok_or(DomainError::ReportNotFound(id))?;
        report.apply_moderation_fields(plan.fields);
        let report = report.clone();

        state.audit.push(audit.clone());
        Ok(TransitionOutcome::Applied { report, audit })
    }

    async fn search_public(&self, search: &PublicSearch) -> RepoResult<Vec<Report>> {
        let filter = search.filter();
        let limit = usize::try_from(search.limit()).unwrap_or(usize::MAX);
        let state = self.state.lock();
        Ok(state
            .newest_first(|r| filter.matches(r))
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_admin(&self, search: &AdminSearch) -> RepoResult<AdminPage> {
        let filter = search.filter();
        let state = self.state.lock();

        let matching = state.newest_first(|r| filter.matches(r));
        let total = matching.len() as i64;
        let reports = matching
            .into_iter()
            .skip(usize::try_from(search.offset()).unwrap_or(usize::MAX))
            .take(ADMIN_PAGE_SIZE as usize)
            .cloned()
            .collect();

        let counters = ReportCounters {
            total_all: state.reports.len() as i64,
            total_flagged: state.reports.values().filter(|r| r.flagged).count() as i64,
            total_deleted: state.reports.values().filter(|r| r.deleted).count() as i64,
        };

        Ok(AdminPage {
            reports,
            total,
            total_pages: total_pages(total, ADMIN_PAGE_SIZE),
            page: search.page(),
            counters,
        })
    }

    async fn find_link_candidates(&self, limit: i64) -> RepoResult<Vec<Report>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let state = self.state.lock();
        Ok(state
            .newest_first(|r| r.contain_link && !r.deleted)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttachmentRepository for MemoryReportStore {
    async fn create(
        &self,
        report_id: ReportId,
        attachment: &NewAttachment,
        now: DateTime<Utc>,
    ) -> RepoResult<Attachment> {
        let mut state = self.state.lock();
        let live = state
            .reports
            .get(&report_id.into_inner())
            .is_some_and(|r| !r.deleted);
        if !live {
            return Err(DomainError::ReportNotFound(report_id));
        }

        let id = AttachmentId::new(bump(&mut state.next_attachment));
        let created = Attachment {
            id,
            report_id,
            original_name: attachment.original_name.clone(),
            storage_path: attachment.storage_path.clone(),
            mime_type: attachment.mime_type.clone(),
            size_bytes: attachment.size_bytes,
            created_at: now,
            deleted: false,
        };
        state.attachments.insert(id.into_inner(), created.clone());
        Ok(created)
    }

    async fn find_with_report(&self, id: AttachmentId) -> RepoResult<Option<(Attachment, Report)>> {
        let state = self.state.lock();
        Ok(state.attachments.get(&id.into_inner()).and_then(|a| {
            state
                .reports
                .get(&a.report_id.into_inner())
                .map(|r| (a.clone(), r.clone()))
        }))
    }

    async fn find_visible_by_reports(&self, report_ids: &[ReportId]) -> RepoResult<Vec<Attachment>> {
        let state = self.state.lock();
        let mut visible: Vec<Attachment> = state
            .attachments
            .values()
            .filter(|a| report_ids.contains(&a.report_id))
            .filter(|a| {
                state
                    .reports
                    .get(&a.report_id.into_inner())
                    .is_some_and(|r| a.is_visible_with(r))
            })
            .cloned()
            .collect();
        visible.sort_by_key(|a| (a.report_id, a.id));
        Ok(visible)
    }
}

#[async_trait]
impl LinkRepository for MemoryReportStore {
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<Link>> {
        let state = self.state.lock();
        Ok(state
            .links
            .iter()
            .filter(|l| l.report_id == report_id && !l.deleted)
            .cloned()
            .collect())
    }

    async fn insert_missing(
        &self,
        report_id: ReportId,
        links: &[NewLink],
        now: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut state = self.state.lock();
        if !state.reports.contains_key(&report_id.into_inner()) {
            return Err(DomainError::ReportNotFound(report_id));
        }

        let mut inserted = 0;
        for link in links {
            let exists = state
                .links
                .iter()
                .any(|l| l.report_id == report_id && !l.deleted && l.url == link.url);
            if exists {
                continue;
            }
            let id = LinkId::new(bump(&mut state.next_link));
            state.links.push(Link {
                id,
                report_id,
                url: link.url.clone(),
                domain: link.domain.clone(),
                safety: None,
                created_at: now,
                deleted: false,
            });
            inserted += 1;
        }
        Ok(inserted)
    }
}

#[async_trait]
impl AuditRepository for MemoryReportStore {
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<AuditEntry>> {
        let state = self.state.lock();
        Ok(state
            .audit
            .iter()
            .filter(|e| e.report_id == report_id)
            .cloned()
            .collect())
    }
}
