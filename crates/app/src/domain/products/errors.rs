//! Products service errors.

use thiserror::Error;

use crate::domain::{brands::records::BrandUuid, store::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product with name {0} already exists")]
    AlreadyExists(String),

    #[error("product not found")]
    NotFound,

    #[error("brand with ID {0} not found")]
    BrandNotFound(BrandUuid),

    #[error("invalid pagination parameters: limit and offset must be non-negative")]
    InvalidPagination,

    #[error("invalid product data")]
    InvalidData,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidPagination => Self::InvalidPagination,
            StoreError::CheckViolation => Self::InvalidData,
            StoreError::UniqueViolation
            | StoreError::ForeignKeyViolation
            | StoreError::HasDependents
            | StoreError::Sql { .. } => Self::Store(error),
        }
    }
}

impl ProductsServiceError {
    /// Classify a write failure for the named product referencing `brand`.
    pub(crate) fn on_write(name: &str, brand: BrandUuid) -> impl FnOnce(StoreError) -> Self + '_ {
        move |error| match error {
            StoreError::UniqueViolation => Self::AlreadyExists(name.to_owned()),
            StoreError::ForeignKeyViolation => Self::BrandNotFound(brand),
            other => other.into(),
        }
    }
}
