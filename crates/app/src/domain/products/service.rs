//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    brands::repository::BrandsRepository,
    pagination::Paged,
    products::{
        data::{NewProduct, ProductUpdate, ProductsFilter, ProductsQuery},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::ProductsRepository,
    },
};

#[derive(Clone)]
pub struct DefaultProductsService {
    products: Arc<dyn ProductsRepository>,
    brands: Arc<dyn BrandsRepository>,
}

impl DefaultProductsService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsRepository>, brands: Arc<dyn BrandsRepository>) -> Self {
        Self { products, brands }
    }
}

#[async_trait]
impl ProductsService for DefaultProductsService {
    #[tracing::instrument(
        name = "service.products.create",
        skip(self, product),
        fields(product.name = %product.name, brand.uuid = %product.brand),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !product.is_valid() {
            return Err(ProductsServiceError::InvalidData);
        }

        if !self.brands.brand_exists(product.brand).await? {
            return Err(ProductsServiceError::BrandNotFound(product.brand));
        }

        if self.products.product_name_exists(product.name.clone()).await? {
            return Err(ProductsServiceError::AlreadyExists(product.name));
        }

        let name = product.name.clone();
        let brand = product.brand;

        let created = self
            .products
            .create_product(ProductUuid::new(), product)
            .await
            .map_err(ProductsServiceError::on_write(&name, brand))?;

        info!(product.uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(name = "service.products.get", skip(self), err)]
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.products
            .get_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(name = "service.products.list", skip(self), err)]
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Paged<ProductRecord>, ProductsServiceError> {
        let page = self
            .products
            .list_products(ProductsFilter::from(query))
            .await?;

        debug!(total = page.total, returned = page.records.len(), "listed products");

        Ok(page)
    }

    #[tracing::instrument(name = "service.products.update", skip(self, update), err)]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.provided();

        let existing = self
            .products
            .get_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if let Some(brand) = update.brand
            && brand != existing.brand_uuid
            && !self.brands.brand_exists(brand).await?
        {
            return Err(ProductsServiceError::BrandNotFound(brand));
        }

        if let Some(name) = update.name.as_ref()
            && *name != existing.name
            && self.products.product_name_exists(name.clone()).await?
        {
            return Err(ProductsServiceError::AlreadyExists(name.clone()));
        }

        if update.is_empty() {
            debug!("no fields provided, returning current product");

            return Ok(existing);
        }

        let name = update.name.clone().unwrap_or(existing.name);
        let brand = update.brand.unwrap_or(existing.brand_uuid);

        let updated = self
            .products
            .update_product(product, update)
            .await
            .map_err(ProductsServiceError::on_write(&name, brand))?;

        info!(product.uuid = %updated.uuid, "updated product");

        Ok(updated)
    }

    #[tracing::instrument(name = "service.products.delete", skip(self), err)]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        if !self.products.product_exists(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        self.products.delete_product(product).await?;

        info!(product.uuid = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Create a product for an existing brand.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single live product with its brand.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve one page of products, newest first.
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Paged<ProductRecord>, ProductsServiceError>;

    /// Apply the provided fields of `update` to a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-delete a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
