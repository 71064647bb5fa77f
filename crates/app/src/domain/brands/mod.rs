//! Brands

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::BrandsServiceError;
pub use repository::{BrandsRepository, MockBrandsRepository, PgBrandsRepository};
pub use service::*;
