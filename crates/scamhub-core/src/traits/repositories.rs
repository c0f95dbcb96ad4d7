//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Attachment, AuditEntry, Link, NewAttachment, NewLink, NewReport, Report};
use crate::error::DomainError;
use crate::moderation::{ModerationCommand, TransitionOutcome};
use crate::query::{AdminPage, AdminSearch, PublicSearch};
use crate::value_objects::{AttachmentId, ReportId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a report and return it with its assigned id
    async fn create(&self, report: &NewReport, now: DateTime<Utc>) -> RepoResult<Report>;

    /// Find report by ID; soft-deleted reports only when `include_deleted`
    async fn find_by_id(&self, id: ReportId, include_deleted: bool) -> RepoResult<Option<Report>>;

    /// Apply a moderation transition and append its audit entry as one
    /// atomic unit scoped to the report.
    ///
    /// Implementations must lock the report for the duration of the
    /// read-plan-write so concurrent transitions serialize.
    async fn apply_moderation(
        &self,
        id: ReportId,
        command: &ModerationCommand,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionOutcome>;

    /// Public listing, newest first
    async fn search_public(&self, search: &PublicSearch) -> RepoResult<Vec<Report>>;

    /// Moderator listing, newest first, one page
    async fn search_admin(&self, search: &AdminSearch) -> RepoResult<AdminPage>;

    /// Non-deleted reports marked as containing links, newest first
    async fn find_link_candidates(&self, limit: i64) -> RepoResult<Vec<Report>>;
}

// ============================================================================
// Attachment Repository
// ============================================================================

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Record an attachment for a live report.
    ///
    /// Fails with `ReportNotFound` if the report is missing or deleted.
    async fn create(
        &self,
        report_id: ReportId,
        attachment: &NewAttachment,
        now: DateTime<Utc>,
    ) -> RepoResult<Attachment>;

    /// Find attachment by ID together with its parent report
    async fn find_with_report(&self, id: AttachmentId) -> RepoResult<Option<(Attachment, Report)>>;

    /// Attachments that may be shown for the given reports
    async fn find_visible_by_reports(&self, report_ids: &[ReportId]) -> RepoResult<Vec<Attachment>>;
}

// ============================================================================
// Link Repository
// ============================================================================

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Non-deleted links for a report in insertion order
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<Link>>;

    /// Insert links not already recorded for the report; returns how many
    /// rows were actually inserted.
    async fn insert_missing(
        &self,
        report_id: ReportId,
        links: &[NewLink],
        now: DateTime<Utc>,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Audit Repository
// ============================================================================

#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Audit trail for a report in creation order
    async fn find_by_report(&self, report_id: ReportId) -> RepoResult<Vec<AuditEntry>>;
}
