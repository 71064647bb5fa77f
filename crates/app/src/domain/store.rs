//! Store errors shared by every gateway.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Failures surfaced by the persistence gateways.
///
/// Absence on a plain lookup is not an error: gateways return `Ok(None)` and
/// let the caller decide. `NotFound` is only raised by writes that matched no
/// live row.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record still has dependent rows")]
    HasDependents,

    #[error("duplicate value violates a unique constraint")]
    UniqueViolation,

    #[error("referenced row does not exist")]
    ForeignKeyViolation,

    #[error("row failed a check constraint")]
    CheckViolation,

    #[error("invalid pagination parameters: limit and offset must be non-negative")]
    InvalidPagination,

    #[error("failed to {operation}: {source}")]
    Sql {
        operation: &'static str,
        #[source]
        source: Error,
    },
}

impl StoreError {
    /// Returns a mapper that classifies a driver error raised by `operation`.
    pub(crate) fn during(operation: &'static str) -> impl FnOnce(Error) -> Self {
        move |source| Self::classify(operation, source)
    }

    fn classify(operation: &'static str, source: Error) -> Self {
        match source.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::UniqueViolation,
            Some(ErrorKind::ForeignKeyViolation) => Self::ForeignKeyViolation,
            Some(ErrorKind::CheckViolation) => Self::CheckViolation,
            Some(ErrorKind::NotNullViolation | ErrorKind::Other | _) | None => {
                Self::Sql { operation, source }
            }
        }
    }

    /// Whether this is an infrastructure fault rather than a domain signal.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Sql { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_keep_operation_context() {
        let error = StoreError::during("list brands")(Error::PoolTimedOut);

        assert!(error.is_fault());
        assert!(
            error.to_string().starts_with("failed to list brands"),
            "unexpected message: {error}"
        );
    }

    #[test]
    fn domain_signals_are_not_faults() {
        assert!(!StoreError::NotFound.is_fault());
        assert!(!StoreError::HasDependents.is_fault());
        assert!(!StoreError::UniqueViolation.is_fault());
    }
}
