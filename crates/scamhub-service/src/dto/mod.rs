//! Data transfer objects for service inputs and outputs
//!
//! - Request DTOs with validation
//! - Response DTOs for serializing outputs
//! - Mappers from domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AdminSearchRequest, AttachFileRequest, CreateReportRequest, LocalReceivedAt,
    ModerationRequest, PublicSearchRequest,
};

pub use responses::{
    AdminSearchResponse, AttachmentDownload, AttachmentResponse, AuditEntryResponse,
    ExtractionResponse, LinkResponse, ModerationResponse, PublicSearchResponse, ReportResponse,
};
