//! Transition planning

use chrono::{DateTime, Utc};

use crate::entities::{AuditEntry, ModerationFields, NewAuditEntry, Report};
use crate::error::DomainError;
use crate::value_objects::{AuditAction, Classification, Performer};

/// Reason recorded when a moderator flags without giving one
pub const DEFAULT_FLAG_REASON: &str = "flagged by admin";

/// A moderation transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Flag { reason: Option<String> },
    Unflag,
    Delete,
    Triage,
    Forward,
    Verify,
    Classify(Classification),
    /// Free-form annotation recorded as `other`
    Note,
}

impl ModerationAction {
    /// Parse an action name as submitted by a moderator form.
    ///
    /// `argument` carries the flag reason or the classification label.
    pub fn parse(action: &str, argument: Option<&str>) -> Result<Self, DomainError> {
        let argument = argument.map(str::trim).filter(|a| !a.is_empty());
        match action.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(Self::Flag {
                reason: argument.map(str::to_string),
            }),
            "unflag" => Ok(Self::Unflag),
            "delete" => Ok(Self::Delete),
            "triage" => Ok(Self::Triage),
            "forward" => Ok(Self::Forward),
            "verify" => Ok(Self::Verify),
            "classify" => {
                let label = argument.ok_or_else(|| {
                    DomainError::InvalidInput("classify requires a label".to_string())
                })?;
                Ok(Self::Classify(Classification::parse(label)?))
            }
            "note" | "other" => Ok(Self::Note),
            other => Err(DomainError::InvalidInput(format!(
                "unknown moderation action: {other}"
            ))),
        }
    }

    /// Audit action written when this transition is applied
    pub fn audit_action(&self) -> AuditAction {
        match self {
            Self::Flag { .. } => AuditAction::Flag,
            Self::Unflag => AuditAction::Unflag,
            Self::Delete => AuditAction::Delete,
            Self::Triage => AuditAction::Triage,
            Self::Forward => AuditAction::Forward,
            Self::Verify => AuditAction::Verify,
            Self::Classify(_) => AuditAction::Classify,
            Self::Note => AuditAction::Other,
        }
    }

    /// Whether the transition is refused once the report is deleted.
    /// Triage, forward and notes only annotate the trail.
    pub fn requires_live_report(&self) -> bool {
        !matches!(self, Self::Triage | Self::Forward | Self::Note)
    }
}

/// An action together with who performs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationCommand {
    pub action: ModerationAction,
    pub performer: Performer,
    pub comment: Option<String>,
}

impl ModerationCommand {
    pub fn new(action: ModerationAction, performer: Performer) -> Self {
        Self {
            action,
            performer,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = Some(comment.trim().to_string()).filter(|c| !c.is_empty());
        self
    }
}

/// Why a transition changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    Deleted,
}

/// Fields to write plus the audit entry to append, as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub fields: ModerationFields,
    pub audit: NewAuditEntry,
}

/// Result of asking the store to apply a transition
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Applied { report: Report, audit: AuditEntry },
    Skipped(SkipReason),
}

impl TransitionOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Applied { report, .. } => Some(report),
            Self::Skipped(_) => None,
        }
    }

    pub fn audit(&self) -> Option<&AuditEntry> {
        match self {
            Self::Applied { audit, .. } => Some(audit),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied { .. } => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Decide the effect of `command` on `current`.
///
/// Missing reports and refused transitions on deleted reports are skips,
/// not errors: nothing is written and no audit entry is produced.
pub fn plan_transition(
    current: Option<&Report>,
    command: &ModerationCommand,
    now: DateTime<Utc>,
) -> Result<TransitionPlan, SkipReason> {
    let report = current.ok_or(SkipReason::NotFound)?;
    if report.deleted && command.action.requires_live_report() {
        return Err(SkipReason::Deleted);
    }

    let performer = command.performer.identity().map(str::to_string);
    let mut fields = report.moderation_fields();
    let mut comment = command.comment.clone();

    match &command.action {
        ModerationAction::Flag { reason } => {
            let reason = reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_FLAG_REASON)
                .to_string();
            fields.flagged = true;
            fields.flag_reason = Some(reason.clone());
            fields.flagged_at = Some(now);
            fields.flagged_by.clone_from(&performer);
            comment.get_or_insert(reason);
        }
        ModerationAction::Unflag => {
            fields.flagged = false;
            fields.flag_reason = None;
            fields.flagged_at = None;
            fields.flagged_by = None;
        }
        ModerationAction::Delete => {
            fields.deleted = true;
            fields.deleted_at = Some(now);
        }
        ModerationAction::Verify => {
            fields.verified = true;
            fields.verified_by.clone_from(&performer);
            fields.verified_at = Some(now);
        }
        ModerationAction::Classify(label) => {
            fields.classification = label.clone();
            fields.classified_by.clone_from(&performer);
            fields.classified_at = Some(now);
            comment.get_or_insert_with(|| label.to_string());
        }
        ModerationAction::Triage | ModerationAction::Forward | ModerationAction::Note => {}
    }
    fields.updated_at = now;

    Ok(TransitionPlan {
        fields,
        audit: NewAuditEntry {
            report_id: report.id,
            action: command.action.audit_action(),
            comment,
            performed_by: performer,
            created_at: now,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewReport;
    use crate::value_objects::{ReportId, ReportType};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn report() -> Report {
        Report::from_new(
            ReportId::new(1),
            NewReport::new(ReportType::Sms, "Your parcel is waiting"),
            t0(),
        )
    }

    fn alice(action: ModerationAction) -> ModerationCommand {
        ModerationCommand::new(action, Performer::moderator("alice"))
    }

    #[test]
    fn test_flag_sets_reason_and_performer() {
        let now = t0() + Duration::minutes(5);
        let plan = plan_transition(
            Some(&report()),
            &alice(ModerationAction::Flag {
                reason: Some("phishing".to_string()),
            }),
            now,
        )
        .unwrap();

        assert!(plan.fields.flagged);
        assert_eq!(plan.fields.flag_reason.as_deref(), Some("phishing"));
        assert_eq!(plan.fields.flagged_by.as_deref(), Some("alice"));
        assert_eq!(plan.fields.flagged_at, Some(now));
        assert_eq!(plan.fields.updated_at, now);
        assert_eq!(plan.audit.action, AuditAction::Flag);
        assert_eq!(plan.audit.comment.as_deref(), Some("phishing"));
        assert_eq!(plan.audit.performed_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_flag_blank_reason_uses_default() {
        let plan = plan_transition(
            Some(&report()),
            &alice(ModerationAction::Flag {
                reason: Some("  ".to_string()),
            }),
            t0(),
        )
        .unwrap();
        assert_eq!(plan.fields.flag_reason.as_deref(), Some(DEFAULT_FLAG_REASON));
    }

    #[test]
    fn test_unflag_clears_flag_metadata() {
        let mut current = report();
        current.flagged = true;
        current.flag_reason = Some("phishing".to_string());
        current.flagged_by = Some("alice".to_string());
        current.flagged_at = Some(t0());

        let plan = plan_transition(Some(&current), &alice(ModerationAction::Unflag), t0()).unwrap();
        assert!(!plan.fields.flagged);
        assert_eq!(plan.fields.flag_reason, None);
        assert_eq!(plan.fields.flagged_by, None);
        assert_eq!(plan.fields.flagged_at, None);
        assert_eq!(plan.audit.action, AuditAction::Unflag);
    }

    #[test]
    fn test_delete_is_terminal() {
        let mut current = report();
        current.deleted = true;
        current.deleted_at = Some(t0());

        for action in [
            ModerationAction::Delete,
            ModerationAction::Flag { reason: None },
            ModerationAction::Unflag,
            ModerationAction::Verify,
            ModerationAction::Classify(Classification::Scam),
        ] {
            let result = plan_transition(Some(&current), &alice(action), t0());
            assert_eq!(result.unwrap_err(), SkipReason::Deleted);
        }
    }

    #[test]
    fn test_triage_allowed_on_deleted_report() {
        let mut current = report();
        current.deleted = true;
        let later = t0() + Duration::hours(1);

        let plan = plan_transition(Some(&current), &alice(ModerationAction::Triage), later).unwrap();
        assert_eq!(plan.audit.action, AuditAction::Triage);
        assert!(plan.fields.deleted);
        assert_eq!(plan.fields.updated_at, later);
    }

    #[test]
    fn test_missing_report_is_skipped() {
        let result = plan_transition(None, &alice(ModerationAction::Forward), t0());
        assert_eq!(result.unwrap_err(), SkipReason::NotFound);
    }

    #[test]
    fn test_verify_and_classify() {
        let now = t0() + Duration::minutes(1);
        let plan = plan_transition(Some(&report()), &alice(ModerationAction::Verify), now).unwrap();
        assert!(plan.fields.verified);
        assert_eq!(plan.fields.verified_by.as_deref(), Some("alice"));
        assert_eq!(plan.fields.verified_at, Some(now));

        let plan = plan_transition(
            Some(&report()),
            &alice(ModerationAction::Classify(Classification::Phishing)),
            now,
        )
        .unwrap();
        assert_eq!(plan.fields.classification, Classification::Phishing);
        assert_eq!(plan.fields.classified_by.as_deref(), Some("alice"));
        assert_eq!(plan.audit.action, AuditAction::Classify);
        assert_eq!(plan.audit.comment.as_deref(), Some("phishing"));
    }

    #[test]
    fn test_system_performer_has_no_identity() {
        let command = ModerationCommand::new(ModerationAction::Note, Performer::System)
            .with_comment("auto-imported");
        let plan = plan_transition(Some(&report()), &command, t0()).unwrap();
        assert_eq!(plan.audit.performed_by, None);
        assert_eq!(plan.audit.action, AuditAction::Other);
        assert_eq!(plan.audit.comment.as_deref(), Some("auto-imported"));
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            ModerationAction::parse("flag", Some("")).unwrap(),
            ModerationAction::Flag { reason: None }
        );
        assert_eq!(
            ModerationAction::parse("Classify", Some("spam")).unwrap(),
            ModerationAction::Classify(Classification::Spam)
        );
        assert!(ModerationAction::parse("classify", None).is_err());
        assert!(ModerationAction::parse("ban", None).is_err());
    }
}
