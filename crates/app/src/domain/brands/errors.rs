//! Brands service errors.

use thiserror::Error;

use crate::domain::store::StoreError;

#[derive(Debug, Error)]
pub enum BrandsServiceError {
    #[error("brand with name {0} already exists")]
    AlreadyExists(String),

    #[error("brand not found")]
    NotFound,

    #[error("cannot delete brand: still has associated products")]
    HasProducts,

    #[error("invalid pagination parameters: limit and offset must be non-negative")]
    InvalidPagination,

    #[error("invalid brand data")]
    InvalidData,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for BrandsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::HasDependents => Self::HasProducts,
            StoreError::InvalidPagination => Self::InvalidPagination,
            StoreError::CheckViolation => Self::InvalidData,
            StoreError::UniqueViolation
            | StoreError::ForeignKeyViolation
            | StoreError::Sql { .. } => Self::Store(error),
        }
    }
}

impl BrandsServiceError {
    /// Classify a write failure, naming the brand a unique violation was
    /// raised for.
    pub(crate) fn on_write(name: &str) -> impl FnOnce(StoreError) -> Self + '_ {
        move |error| match error {
            StoreError::UniqueViolation => Self::AlreadyExists(name.to_owned()),
            other => other.into(),
        }
    }
}
