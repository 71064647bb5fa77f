//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::Db,
    domain::{
        brands::{BrandsRepository, BrandsService, DefaultBrandsService, PgBrandsRepository},
        instrumented::{Instrumented, StoreMetrics},
        products::{DefaultProductsService, PgProductsRepository, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to register store metrics")]
    Metrics(#[source] prometheus::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub brands: Arc<dyn BrandsService>,
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(brands: Arc<dyn BrandsService>, products: Arc<dyn ProductsService>) -> Self {
        Self { brands, products }
    }

    /// Wire the services over instrumented `PostgreSQL` gateways sharing `db`.
    #[must_use]
    pub fn from_db(db: &Db, metrics: StoreMetrics) -> Self {
        let brands: Arc<dyn BrandsRepository> = Arc::new(Instrumented::new(
            PgBrandsRepository::new(db.clone()),
            "brands",
            metrics.clone(),
        ));

        let products = Arc::new(Instrumented::new(
            PgProductsRepository::new(db.clone()),
            "products",
            metrics,
        ));

        Self::new(
            Arc::new(DefaultBrandsService::new(brands.clone())),
            Arc::new(DefaultProductsService::new(products, brands)),
        )
    }
}
