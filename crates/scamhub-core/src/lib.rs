//! # scamhub-core
//!
//! Domain layer for the scam report hub: report entities, the moderation
//! state machine, timestamp normalization, link scanning, search filters
//! and the repository ports. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod links;
pub mod moderation;
pub mod query;
pub mod time;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Attachment, AuditEntry, Link, ModerationFields, NewAttachment, NewAuditEntry, NewLink,
    NewReport, Report,
};
pub use error::DomainError;
pub use links::ExtractionSummary;
pub use moderation::{
    ModerationAction, ModerationCommand, SkipReason, TransitionOutcome, TransitionPlan,
};
pub use query::{AdminPage, AdminSearch, PublicSearch, ReportCounters, ReportFilter, StatusFilter};
pub use traits::{
    AttachmentRepository, AuditRepository, BlobRef, BlobStore, Clock, LinkRepository,
    ManualClock, RepoResult, ReportRepository, SystemClock,
};
pub use value_objects::{
    AttachmentId, AuditAction, AuditEntryId, Classification, LinkId, Performer, ReportId,
    ReportType,
};
