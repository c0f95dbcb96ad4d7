//! Moderation service
//!
//! Every applied transition writes exactly one audit entry together with
//! the report change. Transitions on missing reports, and refused ones on
//! deleted reports, change nothing and are reported as skipped.

use scamhub_core::moderation::{ModerationAction, ModerationCommand, TransitionOutcome};
use scamhub_core::value_objects::{Classification, Performer, ReportId};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{AuditEntryResponse, ModerationRequest, ModerationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a transition and its audit entry as one unit
    #[instrument(skip(self, command), fields(action = %command.action.audit_action()))]
    pub async fn apply(
        &self,
        report_id: ReportId,
        command: ModerationCommand,
    ) -> ServiceResult<ModerationResponse> {
        let outcome = self
            .ctx
            .report_repo()
            .apply_moderation(report_id, &command, self.ctx.now())
            .await?;

        match &outcome {
            TransitionOutcome::Applied { audit, .. } => info!(
                report_id = %report_id,
                audit_id = %audit.id,
                action = audit.action.as_str(),
                performer = %command.performer,
                "Moderation applied"
            ),
            TransitionOutcome::Skipped(reason) => debug!(
                report_id = %report_id,
                reason = ?reason,
                "Moderation skipped"
            ),
        }

        Ok(ModerationResponse::from(outcome))
    }

    /// Handle a moderator form submission
    pub async fn handle(
        &self,
        report_id: ReportId,
        request: ModerationRequest,
        performer: Performer,
    ) -> ServiceResult<ModerationResponse> {
        request.validate()?;

        let action = ModerationAction::parse(&request.action, request.argument.as_deref())?;
        let mut command = ModerationCommand::new(action, performer);
        if let Some(comment) = request.comment {
            command = command.with_comment(comment);
        }

        self.apply(report_id, command).await
    }

    /// Hide a report from public views; a blank reason uses the default
    pub async fn flag(
        &self,
        report_id: ReportId,
        performer: Performer,
        reason: Option<&str>,
    ) -> ServiceResult<ModerationResponse> {
        let action = ModerationAction::Flag {
            reason: reason.map(str::to_string),
        };
        self.apply(report_id, ModerationCommand::new(action, performer))
            .await
    }

    pub async fn unflag(
        &self,
        report_id: ReportId,
        performer: Performer,
    ) -> ServiceResult<ModerationResponse> {
        self.apply(
            report_id,
            ModerationCommand::new(ModerationAction::Unflag, performer),
        )
        .await
    }

    /// Soft-delete; terminal
    pub async fn delete(
        &self,
        report_id: ReportId,
        performer: Performer,
    ) -> ServiceResult<ModerationResponse> {
        self.apply(
            report_id,
            ModerationCommand::new(ModerationAction::Delete, performer),
        )
        .await
    }

    pub async fn triage(
        &self,
        report_id: ReportId,
        performer: Performer,
        comment: Option<&str>,
    ) -> ServiceResult<ModerationResponse> {
        self.annotate(report_id, ModerationAction::Triage, performer, comment)
            .await
    }

    pub async fn forward(
        &self,
        report_id: ReportId,
        performer: Performer,
        comment: Option<&str>,
    ) -> ServiceResult<ModerationResponse> {
        self.annotate(report_id, ModerationAction::Forward, performer, comment)
            .await
    }

    pub async fn verify(
        &self,
        report_id: ReportId,
        performer: Performer,
    ) -> ServiceResult<ModerationResponse> {
        self.apply(
            report_id,
            ModerationCommand::new(ModerationAction::Verify, performer),
        )
        .await
    }

    /// Set the classification label; unknown labels are kept verbatim
    pub async fn classify(
        &self,
        report_id: ReportId,
        performer: Performer,
        label: &str,
    ) -> ServiceResult<ModerationResponse> {
        let label = Classification::parse(label)?;
        self.apply(
            report_id,
            ModerationCommand::new(ModerationAction::Classify(label), performer),
        )
        .await
    }

    /// Free-form note on the audit trail
    pub async fn note(
        &self,
        report_id: ReportId,
        performer: Performer,
        comment: &str,
    ) -> ServiceResult<ModerationResponse> {
        self.annotate(report_id, ModerationAction::Note, performer, Some(comment))
            .await
    }

    async fn annotate(
        &self,
        report_id: ReportId,
        action: ModerationAction,
        performer: Performer,
        comment: Option<&str>,
    ) -> ServiceResult<ModerationResponse> {
        let mut command = ModerationCommand::new(action, performer);
        if let Some(comment) = comment {
            command = command.with_comment(comment);
        }
        self.apply(report_id, command).await
    }

    /// Audit trail in the order it was written
    #[instrument(skip(self))]
    pub async fn audit_trail(&self, report_id: ReportId) -> ServiceResult<Vec<AuditEntryResponse>> {
        let entries = self.ctx.audit_repo().find_by_report(report_id).await?;
        Ok(entries.into_iter().map(AuditEntryResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateReportRequest;
    use crate::services::report::ReportService;
    use crate::services::testing::{alice, fixture, Fixture};
    use chrono::Duration;
    use scamhub_core::Clock;

    async fn seed(fx: &Fixture, message: &str) -> ReportId {
        let report = ReportService::new(&fx.ctx)
            .create_report(CreateReportRequest::new("sms", message))
            .await
            .unwrap();
        ReportId::new(report.id)
    }

    #[tokio::test]
    async fn test_flag_then_unflag() {
        let fx = fixture();
        let id = seed(&fx, "Your account is locked").await;
        let service = ModerationService::new(&fx.ctx);

        let flagged = service.flag(id, alice(), Some("phishing")).await.unwrap();
        let report = flagged.report.unwrap();
        assert!(flagged.applied);
        assert!(report.flagged);
        assert_eq!(report.flag_reason.as_deref(), Some("phishing"));
        assert_eq!(report.flagged_by.as_deref(), Some("alice"));
        assert_eq!(report.flagged_at, Some(fx.clock.now()));

        fx.clock.advance(Duration::minutes(5));
        let unflagged = service.unflag(id, alice()).await.unwrap();
        let report = unflagged.report.unwrap();
        assert!(!report.flagged);
        assert_eq!(report.flag_reason, None);
        assert_eq!(report.flagged_by, None);
        assert_eq!(report.flagged_at, None);

        let trail = service.audit_trail(id).await.unwrap();
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec!["flag", "unflag"]);
        assert_eq!(trail[0].comment.as_deref(), Some("phishing"));
        assert_eq!(trail[0].performed_by, "alice");
    }

    #[tokio::test]
    async fn test_flag_without_reason_uses_default() {
        let fx = fixture();
        let id = seed(&fx, "Claim your refund").await;

        let response = ModerationService::new(&fx.ctx)
            .flag(id, alice(), Some("  "))
            .await
            .unwrap();
        assert_eq!(
            response.report.unwrap().flag_reason.as_deref(),
            Some("flagged by admin")
        );
    }

    #[tokio::test]
    async fn test_delete_twice_is_noop() {
        let fx = fixture();
        let id = seed(&fx, "Parcel fee due").await;
        let service = ModerationService::new(&fx.ctx);

        let first = service.delete(id, alice()).await.unwrap();
        let deleted_at = first.report.unwrap().deleted_at;
        assert!(deleted_at.is_some());

        fx.clock.advance(Duration::hours(1));
        let second = service.delete(id, alice()).await.unwrap();
        assert!(!second.applied);
        assert_eq!(second.skipped, Some("deleted"));

        let trail = service.audit_trail(id).await.unwrap();
        assert_eq!(trail.len(), 1);

        let report = ReportService::new(&fx.ctx).get_report(id, true).await.unwrap();
        assert_eq!(report.deleted_at, deleted_at);
    }

    #[tokio::test]
    async fn test_missing_report_is_skipped() {
        let fx = fixture();
        let response = ModerationService::new(&fx.ctx)
            .verify(ReportId::new(404), alice())
            .await
            .unwrap();
        assert!(!response.applied);
        assert_eq!(response.skipped, Some("not_found"));
        assert!(response.audit.is_none());
    }

    #[tokio::test]
    async fn test_each_transition_writes_one_audit_entry() {
        let fx = fixture();
        let id = seed(&fx, "IRS final notice").await;
        let service = ModerationService::new(&fx.ctx);

        service.triage(id, alice(), Some("looks real")).await.unwrap();
        service.verify(id, alice()).await.unwrap();
        service.classify(id, alice(), "phishing").await.unwrap();
        service.forward(id, alice(), None).await.unwrap();
        service.note(id, Performer::System, "auto-check passed").await.unwrap();

        let trail = service.audit_trail(id).await.unwrap();
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec!["triage", "verify", "classify", "forward", "other"]);
        assert_eq!(trail[4].performed_by, "system");

        let report = ReportService::new(&fx.ctx).get_report(id, false).await.unwrap();
        assert!(report.verified);
        assert_eq!(report.verified_by.as_deref(), Some("alice"));
        assert_eq!(report.classification, "phishing");
    }

    #[tokio::test]
    async fn test_annotations_allowed_after_delete() {
        let fx = fixture();
        let id = seed(&fx, "Gift card scam").await;
        let service = ModerationService::new(&fx.ctx);

        service.delete(id, alice()).await.unwrap();
        assert!(service.triage(id, alice(), None).await.unwrap().applied);
        assert_eq!(
            service.verify(id, alice()).await.unwrap().skipped,
            Some("deleted")
        );
    }

    #[tokio::test]
    async fn test_handle_form_submission() {
        let fx = fixture();
        let id = seed(&fx, "Bank transfer request").await;
        let service = ModerationService::new(&fx.ctx);

        let response = service
            .handle(
                id,
                ModerationRequest {
                    action: "classify".to_string(),
                    argument: Some("Romance Scam".to_string()),
                    comment: Some("  ".to_string()),
                },
                alice(),
            )
            .await
            .unwrap();
        assert!(response.applied);
        assert_eq!(response.audit.unwrap().action, "classify");

        let err = service
            .handle(
                id,
                ModerationRequest {
                    action: "explode".to_string(),
                    argument: None,
                    comment: None,
                },
                alice(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
