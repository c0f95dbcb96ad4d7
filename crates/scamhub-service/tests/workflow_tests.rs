//! End-to-end workflow tests over the in-memory stores
//!
//! Run with: cargo test -p scamhub-service --test workflow_tests

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use scamhub_common::{LinkSweepConfig, StorageConfig};
use scamhub_core::{AttachmentId, ManualClock, Performer, ReportId};
use scamhub_db::{MemoryBlobStore, MemoryReportStore};
use scamhub_service::dto::{AdminSearchRequest, CreateReportRequest, PublicSearchRequest};
use scamhub_service::{
    AttachmentService, LinkService, ModerationService, ReportService, SearchService,
    ServiceContext,
};

fn context(clock: Arc<ManualClock>) -> ServiceContext {
    ServiceContext::builder()
        .store(Arc::new(MemoryReportStore::new()))
        .blob_store(Arc::new(MemoryBlobStore::new()))
        .clock(clock)
        .storage(StorageConfig {
            upload_dir: "./uploads".to_string(),
            max_file_size_mb: 2,
        })
        .link_sweep(LinkSweepConfig::default())
        .build()
        .expect("Failed to build context")
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap(),
    ))
}

// ============================================================================
// Intake to moderation
// ============================================================================

#[tokio::test]
async fn test_report_lifecycle() {
    let clock = clock();
    let ctx = context(clock.clone());
    let moderator = Performer::moderator("alice");

    let mut request = CreateReportRequest::new("email", "Verify your account at https://bank.scam.test/login");
    request.subject = Some("Account suspended".to_string());
    request.received_at = Some("2024-07-15T09:00:00".to_string());
    request.received_at_tz = Some("America/New_York".to_string());
    let report = ReportService::new(&ctx).create_report(request).await.unwrap();
    let id = ReportId::new(report.id);

    assert_eq!(
        report.received_at,
        Some(Utc.with_ymd_and_hms(2024, 7, 15, 13, 0, 0).unwrap())
    );
    assert_eq!(
        report.received_at_local.as_deref(),
        Some("2024-07-15T09:00:00-04:00")
    );
    assert!(report.contain_link);

    let attachment = ReportService::new(&ctx)
        .upload_attachment(id, b"fake-png", "screen.png", Some("image/png"))
        .await
        .unwrap();

    let extraction = LinkService::new(&ctx).extract_links(id).await.unwrap();
    assert_eq!(extraction.inserted, 1);

    clock.advance(Duration::minutes(10));
    let moderation = ModerationService::new(&ctx);
    moderation.classify(id, moderator.clone(), "phishing").await.unwrap();
    moderation.verify(id, moderator.clone()).await.unwrap();
    moderation.flag(id, moderator.clone(), Some("credential harvest")).await.unwrap();

    let public = SearchService::new(&ctx)
        .public_search(PublicSearchRequest::default())
        .await
        .unwrap();
    assert!(public.reports.is_empty());
    assert!(AttachmentService::new(&ctx)
        .open(AttachmentId::new(attachment.id))
        .await
        .unwrap_err()
        .is_not_found());

    let admin = SearchService::new(&ctx)
        .admin_search(AdminSearchRequest::default())
        .await
        .unwrap();
    assert_eq!(admin.total, 1);
    assert_eq!(admin.total_flagged, 1);
    let listed = &admin.reports[0];
    assert_eq!(listed.classification, "phishing");
    assert!(listed.verified);
    assert_eq!(listed.flag_reason.as_deref(), Some("credential harvest"));

    moderation.delete(id, moderator.clone()).await.unwrap();
    let again = moderation.delete(id, moderator).await.unwrap();
    assert!(!again.applied);

    let trail = moderation.audit_trail(id).await.unwrap();
    let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec!["classify", "verify", "flag", "delete"]);
}

#[tokio::test]
async fn test_concurrent_transitions_each_audited() {
    let ctx = Arc::new(context(clock()));
    let report = ReportService::new(&ctx)
        .create_report(CreateReportRequest::new("call", "Caller claimed to be police"))
        .await
        .unwrap();
    let id = ReportId::new(report.id);

    let mut handles = Vec::new();
    for i in 0..8 {
        let ctx = Arc::clone(&ctx);
        handles.push(tokio::spawn(async move {
            let moderator = Performer::moderator(format!("mod{i}"));
            let service = ModerationService::new(&ctx);
            if i % 2 == 0 {
                service.flag(id, moderator, None).await
            } else {
                service.unflag(id, moderator).await
            }
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().applied);
    }

    let trail = ModerationService::new(&ctx).audit_trail(id).await.unwrap();
    assert_eq!(trail.len(), 8);

    let last = trail.last().unwrap();
    let report = ReportService::new(&ctx).get_report(id, false).await.unwrap();
    assert_eq!(report.flagged, last.action == "flag");
}

#[tokio::test]
async fn test_concurrent_flag_and_delete() {
    let ctx = Arc::new(context(clock()));
    let report = ReportService::new(&ctx)
        .create_report(CreateReportRequest::new("sms", "Parcel held, pay customs fee"))
        .await
        .unwrap();
    let id = ReportId::new(report.id);

    let mut handles = Vec::new();
    for i in 0..6 {
        let ctx = Arc::clone(&ctx);
        handles.push(tokio::spawn(async move {
            let moderator = Performer::moderator(format!("mod{i}"));
            let service = ModerationService::new(&ctx);
            if i == 3 {
                service.delete(id, moderator).await
            } else {
                service.flag(id, moderator, Some("spam")).await
            }
        }));
    }
    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().applied {
            applied += 1;
        }
    }

    let trail = ModerationService::new(&ctx).audit_trail(id).await.unwrap();
    assert_eq!(trail.len(), applied);
    assert_eq!(trail.iter().filter(|e| e.action == "delete").count(), 1);

    let report = ReportService::new(&ctx).get_report(id, true).await.unwrap();
    assert!(report.deleted);
    assert_eq!(report.updated_at, trail.last().unwrap().created_at);
}

// ============================================================================
// Serialized shapes
// ============================================================================

#[tokio::test]
async fn test_response_json_shape() {
    let ctx = context(clock());
    let report = ReportService::new(&ctx)
        .create_report(CreateReportRequest::new("sms", "Toll unpaid, pay now"))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["report_type"], "sms");
    assert_eq!(json["classification"], "unclassified");
    assert_eq!(json["flagged"], false);
    assert!(json.get("attachments").is_none());

    let skipped = ModerationService::new(&ctx)
        .unflag(ReportId::new(report.id + 1), Performer::System)
        .await
        .unwrap();
    let json = serde_json::to_value(&skipped).unwrap();
    assert_eq!(json["applied"], false);
    assert_eq!(json["skipped"], "not_found");
    assert!(json.get("audit").is_none());

    let summary = LinkService::new(&ctx).sweep().await.unwrap();
    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["reports"], 0);
}
