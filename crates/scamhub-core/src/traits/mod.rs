//! Ports - interfaces the domain needs from the outside world

mod blob;
mod clock;
mod repositories;

pub use blob::{BlobRef, BlobStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use repositories::{
    AttachmentRepository, AuditRepository, LinkRepository, RepoResult, ReportRepository,
};
