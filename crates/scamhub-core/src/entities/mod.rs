//! Domain entities - core business objects

mod attachment;
mod audit_entry;
mod link;
mod report;

pub use attachment::{Attachment, NewAttachment};
pub use audit_entry::{AuditEntry, NewAuditEntry};
pub use link::{Link, NewLink};
pub use report::{ModerationFields, NewReport, Report};
