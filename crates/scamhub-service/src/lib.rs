//! # scamhub-service
//!
//! Application layer: report intake, moderation, link extraction, search
//! and attachment access, orchestrated over the ports in `scamhub-core`.

pub mod dto;
pub mod services;

pub use services::{
    AttachmentService, LinkService, ModerationService, ReportService, SearchService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SweepSummary,
};
