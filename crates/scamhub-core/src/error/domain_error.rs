//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AttachmentId, ReportId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Report not found: {0}")]
    ReportNotFound(ReportId),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),

    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Conflict: {0}")]
    Conflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReportNotFound(_) => "UNKNOWN_REPORT",
            Self::AttachmentNotFound(_) => "UNKNOWN_ATTACHMENT",
            Self::BlobNotFound(_) => "UNKNOWN_BLOB",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::Conflict(_) => "CONFLICT",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ReportNotFound(_) | Self::AttachmentNotFound(_) | Self::BlobNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::FileTooLarge { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if the storage collaborator failed
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
