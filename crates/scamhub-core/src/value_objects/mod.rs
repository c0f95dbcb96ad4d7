//! Value objects - immutable types that represent domain concepts

mod audit_action;
mod classification;
mod id;
mod performer;
mod report_type;

pub use audit_action::AuditAction;
pub use classification::{Classification, MAX_CUSTOM_LABEL_LEN};
pub use id::{AttachmentId, AuditEntryId, IdParseError, LinkId, ReportId};
pub use performer::Performer;
pub use report_type::ReportType;
