//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attachment;
mod audit_entry;
mod link;
mod report;

pub use attachment::AttachmentModel;
pub use audit_entry::AuditEntryModel;
pub use link::LinkModel;
pub use report::{ReportModel, REPORT_COLUMNS};
