//! Storefront Catalog Domain

pub mod brands;
pub mod instrumented;
pub mod pagination;
pub mod products;
pub mod store;
