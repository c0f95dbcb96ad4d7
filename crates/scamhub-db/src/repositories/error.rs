//! Error handling utilities for repositories

use scamhub_core::error::DomainError;
use scamhub_core::value_objects::ReportId;
use sqlx::Error as SqlxError;

/// SQLSTATE codes reported when concurrent writers collide
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if let Some(code) = db_err.code() {
            if matches!(
                code.as_ref(),
                SERIALIZATION_FAILURE | DEADLOCK_DETECTED | LOCK_NOT_AVAILABLE
            ) {
                return DomainError::Conflict(db_err.message().to_string());
            }
        }
    }
    DomainError::StorageUnavailable(e.to_string())
}

/// Check for foreign key violation and return appropriate error or fallback
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    map_db_error(e)
}

/// Create a "report not found" error
pub fn report_not_found(id: ReportId) -> DomainError {
    DomainError::ReportNotFound(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_storage() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert!(err.is_storage());

        let err = map_fk_violation(SqlxError::RowNotFound, || report_not_found(ReportId::new(1)));
        assert!(err.is_storage());
    }
}
