//! Application error types
//!
//! Unified error for the outermost edge of the application: credential
//! checks and the batch binaries.

use scamhub_core::DomainError;
use serde::Serialize;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Storage errors
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 503 Service Unavailable
            Self::StorageUnavailable(_) => 503,

            // 500 Internal Server Error
            Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else if e.is_storage() {
                    503
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Machine-readable error summary
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use scamhub_core::ReportId;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::NotFound("report".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::StorageUnavailable("down".to_string()).status_code(), 503);
        assert_eq!(
            AppError::from(ConfigError::MissingVar("DATABASE_URL")).status_code(),
            500
        );
    }

    #[test]
    fn test_domain_status_codes() {
        let err = AppError::from(DomainError::ReportNotFound(ReportId::new(1)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_REPORT");

        let err = AppError::from(DomainError::StorageUnavailable("timeout".to_string()));
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_is_client_error() {
        assert!(AppError::InvalidCredentials.is_client_error());
        assert!(AppError::NotFound("test".to_string()).is_client_error());
        assert!(!AppError::StorageUnavailable("test".to_string()).is_client_error());
        assert!(!AppError::internal(anyhow::anyhow!("boom")).is_client_error());
    }

    #[test]
    fn test_error_response() {
        let err = AppError::from(ConfigError::MissingVar("ADMIN_USER"));
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "CONFIG_ERROR");
        assert_eq!(
            response.message,
            "Configuration error: Missing required environment variable: ADMIN_USER"
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap()["code"],
            "CONFIG_ERROR"
        );
    }
}
