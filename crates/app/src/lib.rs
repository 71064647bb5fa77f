//! Storefront catalog domain, persistence and service wiring.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
