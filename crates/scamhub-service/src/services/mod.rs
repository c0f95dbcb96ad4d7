//! Application services
//!
//! Each service borrows a [`ServiceContext`] holding the shared ports.

mod attachment;
mod context;
mod error;
mod links;
mod moderation;
mod report;
mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use attachment::AttachmentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use links::{LinkService, SweepSummary};
pub use moderation::ModerationService;
pub use report::ReportService;
pub use search::SearchService;
