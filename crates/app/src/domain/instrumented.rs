//! Instrumented gateways.
//!
//! [`Instrumented`] wraps a repository so every call runs inside a `db.call`
//! span and is counted, without the repository itself knowing about either.

use std::future::Future;

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};
use tracing::{Instrument, error, info_span};

use crate::domain::{
    brands::{
        data::{BrandUpdate, BrandsFilter, NewBrand},
        records::{BrandRecord, BrandUuid},
        repository::BrandsRepository,
    },
    pagination::Paged,
    products::{
        data::{NewProduct, ProductUpdate, ProductsFilter},
        records::{ProductRecord, ProductUuid},
        repository::ProductsRepository,
    },
    store::StoreError,
};

/// Store call counters, labelled by table and operation.
#[derive(Debug, Clone)]
pub struct StoreMetrics {
    calls: IntCounterVec,
    errors: IntCounterVec,
}

impl StoreMetrics {
    /// Create the counters, registering them with `registry` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a counter is malformed or already registered.
    pub fn new(registry: Option<&Registry>) -> Result<Self, prometheus::Error> {
        let calls = IntCounterVec::new(
            Opts::new(
                "storefront_db_calls_total",
                "Total store calls partitioned by table and operation.",
            ),
            &["table", "operation"],
        )?;

        let errors = IntCounterVec::new(
            Opts::new(
                "storefront_db_errors_total",
                "Store calls that failed with an infrastructure fault, partitioned by table and operation.",
            ),
            &["table", "operation"],
        )?;

        if let Some(registry) = registry {
            registry.register(Box::new(calls.clone()))?;
            registry.register(Box::new(errors.clone()))?;
        }

        Ok(Self { calls, errors })
    }

    /// Counters that are never exported.
    ///
    /// # Errors
    ///
    /// Returns an error if a counter is malformed.
    pub fn unregistered() -> Result<Self, prometheus::Error> {
        Self::new(None)
    }

    #[must_use]
    pub fn calls(&self, table: &str, operation: &str) -> u64 {
        self.calls.with_label_values(&[table, operation]).get()
    }

    #[must_use]
    pub fn errors(&self, table: &str, operation: &str) -> u64 {
        self.errors.with_label_values(&[table, operation]).get()
    }
}

/// A gateway decorated with tracing and call metrics.
#[derive(Debug, Clone)]
pub struct Instrumented<R> {
    inner: R,
    table: &'static str,
    metrics: StoreMetrics,
}

impl<R> Instrumented<R> {
    #[must_use]
    pub fn new(inner: R, table: &'static str, metrics: StoreMetrics) -> Self {
        Self {
            inner,
            table,
            metrics,
        }
    }

    async fn observe<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        let span = info_span!("db.call", db.table = self.table, db.operation = operation);

        self.metrics
            .calls
            .with_label_values(&[self.table, operation])
            .inc();

        let result = call.instrument(span.clone()).await;

        if let Err(ref source) = result
            && source.is_fault()
        {
            self.metrics
                .errors
                .with_label_values(&[self.table, operation])
                .inc();

            span.in_scope(|| error!(error = %source, "store call failed"));
        }

        result
    }
}

#[async_trait]
impl<R: BrandsRepository> BrandsRepository for Instrumented<R> {
    async fn create_brand(
        &self,
        uuid: BrandUuid,
        brand: NewBrand,
    ) -> Result<BrandRecord, StoreError> {
        self.observe("create", self.inner.create_brand(uuid, brand))
            .await
    }

    async fn get_brand(&self, brand: BrandUuid) -> Result<Option<BrandRecord>, StoreError> {
        self.observe("get_by_id", self.inner.get_brand(brand)).await
    }

    async fn get_brand_by_name(&self, name: String) -> Result<Option<BrandRecord>, StoreError> {
        self.observe("get_by_name", self.inner.get_brand_by_name(name))
            .await
    }

    async fn brand_exists(&self, brand: BrandUuid) -> Result<bool, StoreError> {
        self.observe("exists_by_id", self.inner.brand_exists(brand))
            .await
    }

    async fn brand_name_exists(&self, name: String) -> Result<bool, StoreError> {
        self.observe("exists_by_name", self.inner.brand_name_exists(name))
            .await
    }

    async fn list_brands(&self, filter: BrandsFilter) -> Result<Paged<BrandRecord>, StoreError> {
        self.observe("list", self.inner.list_brands(filter)).await
    }

    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<BrandRecord, StoreError> {
        self.observe("update", self.inner.update_brand(brand, update))
            .await
    }

    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), StoreError> {
        self.observe("delete", self.inner.delete_brand(brand)).await
    }
}

#[async_trait]
impl<R: ProductsRepository> ProductsRepository for Instrumented<R> {
    async fn create_product(
        &self,
        uuid: ProductUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, StoreError> {
        self.observe("create", self.inner.create_product(uuid, product))
            .await
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        self.observe("get_by_id", self.inner.get_product(product))
            .await
    }

    async fn get_product_by_name(
        &self,
        name: String,
    ) -> Result<Option<ProductRecord>, StoreError> {
        self.observe("get_by_name", self.inner.get_product_by_name(name))
            .await
    }

    async fn product_exists(&self, product: ProductUuid) -> Result<bool, StoreError> {
        self.observe("exists_by_id", self.inner.product_exists(product))
            .await
    }

    async fn product_name_exists(&self, name: String) -> Result<bool, StoreError> {
        self.observe("exists_by_name", self.inner.product_name_exists(name))
            .await
    }

    async fn list_products(
        &self,
        filter: ProductsFilter,
    ) -> Result<Paged<ProductRecord>, StoreError> {
        self.observe("list", self.inner.list_products(filter)).await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, StoreError> {
        self.observe("update", self.inner.update_product(product, update))
            .await
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), StoreError> {
        self.observe("delete", self.inner.delete_product(product))
            .await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::brands::repository::MockBrandsRepository;

    use super::*;

    #[tokio::test]
    async fn every_call_is_counted() -> TestResult {
        let mut inner = MockBrandsRepository::new();

        inner
            .expect_brand_exists()
            .times(2)
            .returning(|_| Ok(true));

        let metrics = StoreMetrics::unregistered()?;
        let repository = Instrumented::new(inner, "brands", metrics.clone());

        repository.brand_exists(BrandUuid::new()).await?;
        repository.brand_exists(BrandUuid::new()).await?;

        assert_eq!(metrics.calls("brands", "exists_by_id"), 2);
        assert_eq!(metrics.errors("brands", "exists_by_id"), 0);

        Ok(())
    }

    #[tokio::test]
    async fn only_faults_count_as_errors() -> TestResult {
        let mut inner = MockBrandsRepository::new();

        inner
            .expect_delete_brand()
            .once()
            .return_once(|_| Err(StoreError::HasDependents));

        inner
            .expect_get_brand()
            .once()
            .return_once(|_| Err(StoreError::during("get brand")(sqlx::Error::PoolTimedOut)));

        let metrics = StoreMetrics::unregistered()?;
        let repository = Instrumented::new(inner, "brands", metrics.clone());

        let deleted = repository.delete_brand(BrandUuid::new()).await;
        let fetched = repository.get_brand(BrandUuid::new()).await;

        assert!(matches!(deleted, Err(StoreError::HasDependents)));
        assert!(matches!(fetched, Err(StoreError::Sql { .. })));
        assert_eq!(metrics.errors("brands", "delete"), 0);
        assert_eq!(metrics.errors("brands", "get_by_id"), 1);

        Ok(())
    }

    #[test]
    fn registering_twice_is_rejected() -> TestResult {
        let registry = Registry::new();

        StoreMetrics::new(Some(&registry))?;

        assert!(StoreMetrics::new(Some(&registry)).is_err());

        Ok(())
    }
}
