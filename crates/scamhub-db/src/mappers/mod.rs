//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity` / `From<Model> for Entity`: database rows to domain objects
//! - `*Insert` / `*Update` structs: entity data prepared for binding

mod attachment;
mod audit_entry;
mod link;
mod report;

pub use report::{ModerationUpdate, ReportInsert};
