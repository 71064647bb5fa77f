//! Brands service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    brands::{
        data::{BrandUpdate, BrandsFilter, BrandsQuery, NewBrand},
        errors::BrandsServiceError,
        records::{BrandRecord, BrandUuid},
        repository::BrandsRepository,
    },
    pagination::Paged,
};

#[derive(Clone)]
pub struct DefaultBrandsService {
    brands: Arc<dyn BrandsRepository>,
}

impl DefaultBrandsService {
    #[must_use]
    pub fn new(brands: Arc<dyn BrandsRepository>) -> Self {
        Self { brands }
    }
}

#[async_trait]
impl BrandsService for DefaultBrandsService {
    #[tracing::instrument(name = "service.brands.create", skip(self, brand), fields(brand.name = %brand.name), err)]
    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, BrandsServiceError> {
        if brand.name.is_empty() {
            return Err(BrandsServiceError::InvalidData);
        }

        if self.brands.brand_name_exists(brand.name.clone()).await? {
            return Err(BrandsServiceError::AlreadyExists(brand.name));
        }

        let name = brand.name.clone();

        let created = self
            .brands
            .create_brand(BrandUuid::new(), brand)
            .await
            .map_err(BrandsServiceError::on_write(&name))?;

        info!(brand.uuid = %created.uuid, "created brand");

        Ok(created)
    }

    #[tracing::instrument(name = "service.brands.get", skip(self), err)]
    async fn get_brand(&self, brand: BrandUuid) -> Result<BrandRecord, BrandsServiceError> {
        self.brands
            .get_brand(brand)
            .await?
            .ok_or(BrandsServiceError::NotFound)
    }

    #[tracing::instrument(name = "service.brands.list", skip(self), err)]
    async fn list_brands(
        &self,
        query: BrandsQuery,
    ) -> Result<Paged<BrandRecord>, BrandsServiceError> {
        let page = self.brands.list_brands(BrandsFilter::from(query)).await?;

        debug!(total = page.total, returned = page.records.len(), "listed brands");

        Ok(page)
    }

    #[tracing::instrument(name = "service.brands.update", skip(self, update), fields(brand.name = %update.name), err)]
    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<BrandRecord, BrandsServiceError> {
        if update.name.is_empty() {
            return Err(BrandsServiceError::InvalidData);
        }

        let existing = self
            .brands
            .get_brand(brand)
            .await?
            .ok_or(BrandsServiceError::NotFound)?;

        if existing.name != update.name
            && let Some(other) = self.brands.get_brand_by_name(update.name.clone()).await?
            && other.uuid != brand
        {
            return Err(BrandsServiceError::AlreadyExists(update.name));
        }

        let name = update.name.clone();

        let updated = self
            .brands
            .update_brand(brand, update)
            .await
            .map_err(BrandsServiceError::on_write(&name))?;

        info!(brand.uuid = %updated.uuid, "updated brand");

        Ok(updated)
    }

    #[tracing::instrument(name = "service.brands.delete", skip(self), err)]
    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), BrandsServiceError> {
        if !self.brands.brand_exists(brand).await? {
            return Err(BrandsServiceError::NotFound);
        }

        self.brands.delete_brand(brand).await?;

        info!(brand.uuid = %brand, "deleted brand");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BrandsService: Send + Sync {
    /// Create a brand with a freshly generated identifier.
    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, BrandsServiceError>;

    /// Retrieve a single live brand.
    async fn get_brand(&self, brand: BrandUuid) -> Result<BrandRecord, BrandsServiceError>;

    /// Retrieve one page of brands, newest first.
    async fn list_brands(
        &self,
        query: BrandsQuery,
    ) -> Result<Paged<BrandRecord>, BrandsServiceError>;

    /// Rename a brand.
    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<BrandRecord, BrandsServiceError>;

    /// Soft-delete a brand no live product references.
    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), BrandsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::domain::{brands::repository::MockBrandsRepository, store::StoreError};

    use super::*;

    fn brand_record(uuid: BrandUuid, name: &str) -> BrandRecord {
        let now = Timestamp::now();

        BrandRecord {
            uuid,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn service(repository: MockBrandsRepository) -> DefaultBrandsService {
        DefaultBrandsService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn create_brand_generates_uuid_and_returns_record() -> TestResult {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_brand_name_exists()
            .with(eq("Acme".to_string()))
            .once()
            .return_once(|_| Ok(false));

        repository
            .expect_create_brand()
            .withf(|uuid, brand| !uuid.is_nil() && brand.name == "Acme")
            .once()
            .return_once(|uuid, brand| Ok(brand_record(uuid, &brand.name)));

        let created = service(repository)
            .create_brand(NewBrand {
                name: "Acme".to_string(),
            })
            .await?;

        assert_eq!(created.name, "Acme");
        assert!(!created.uuid.is_nil());

        Ok(())
    }

    #[tokio::test]
    async fn create_brand_with_taken_name_is_a_conflict() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_brand_name_exists()
            .once()
            .return_once(|_| Ok(true));

        repository.expect_create_brand().never();

        let result = service(repository)
            .create_brand(NewBrand {
                name: "Acme".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::AlreadyExists(ref name)) if name == "Acme"),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_brand_losing_a_race_is_still_a_conflict() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_brand_name_exists()
            .once()
            .return_once(|_| Ok(false));

        repository
            .expect_create_brand()
            .once()
            .return_once(|_, _| Err(StoreError::UniqueViolation));

        let result = service(repository)
            .create_brand(NewBrand {
                name: "Acme".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::AlreadyExists(_))),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_brand_with_empty_name_never_reaches_the_store() {
        let mut repository = MockBrandsRepository::new();

        repository.expect_brand_name_exists().never();
        repository.expect_create_brand().never();

        let result = service(repository)
            .create_brand(NewBrand {
                name: String::new(),
            })
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_missing_brand_is_not_found() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_get_brand()
            .once()
            .return_once(|_| Ok(None));

        let result = service(repository).get_brand(BrandUuid::new()).await;

        assert!(
            matches!(result, Err(BrandsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_brands_passes_limit_offset_and_search() -> TestResult {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_list_brands()
            .with(eq(BrandsFilter {
                search: Some("ac".to_string()),
                limit: 5,
                offset: 10,
            }))
            .once()
            .return_once(|_| Ok(Paged::empty(12)));

        let page = service(repository)
            .list_brands(BrandsQuery {
                search: Some("ac".to_string()),
                page: crate::domain::pagination::PageRequest::new(Some(3), Some(5)),
            })
            .await?;

        assert_eq!(page.total, 12);
        assert!(page.records.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_brand_keeping_its_name_skips_uniqueness_check() -> TestResult {
        let uuid = BrandUuid::new();
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_get_brand()
            .once()
            .return_once(move |_| Ok(Some(brand_record(uuid, "Acme"))));

        repository.expect_get_brand_by_name().never();

        repository
            .expect_update_brand()
            .once()
            .return_once(|uuid, update| Ok(brand_record(uuid, &update.name)));

        let updated = service(repository)
            .update_brand(
                uuid,
                BrandUpdate {
                    name: "Acme".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.name, "Acme");

        Ok(())
    }

    #[tokio::test]
    async fn update_brand_to_anothers_name_is_a_conflict() {
        let uuid = BrandUuid::new();
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_get_brand()
            .once()
            .return_once(move |_| Ok(Some(brand_record(uuid, "Acme"))));

        repository
            .expect_get_brand_by_name()
            .with(eq("Globex".to_string()))
            .once()
            .return_once(|name| Ok(Some(brand_record(BrandUuid::new(), &name))));

        repository.expect_update_brand().never();

        let result = service(repository)
            .update_brand(
                uuid,
                BrandUpdate {
                    name: "Globex".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::AlreadyExists(ref name)) if name == "Globex"),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_missing_brand_is_not_found() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_get_brand()
            .once()
            .return_once(|_| Ok(None));

        repository.expect_update_brand().never();

        let result = service(repository)
            .update_brand(
                BrandUuid::new(),
                BrandUpdate {
                    name: "Acme".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_brand_with_products_is_rejected() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_brand_exists()
            .once()
            .return_once(|_| Ok(true));

        repository
            .expect_delete_brand()
            .once()
            .return_once(|_| Err(StoreError::HasDependents));

        let result = service(repository).delete_brand(BrandUuid::new()).await;

        assert!(
            matches!(result, Err(BrandsServiceError::HasProducts)),
            "expected HasProducts, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_missing_brand_is_not_found() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_brand_exists()
            .once()
            .return_once(|_| Ok(false));

        repository.expect_delete_brand().never();

        let result = service(repository).delete_brand(BrandUuid::new()).await;

        assert!(
            matches!(result, Err(BrandsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn store_faults_surface_as_store_errors() {
        let mut repository = MockBrandsRepository::new();

        repository
            .expect_get_brand()
            .once()
            .return_once(|_| Err(StoreError::during("get brand")(sqlx::Error::PoolTimedOut)));

        let result = service(repository).get_brand(BrandUuid::new()).await;

        assert!(
            matches!(result, Err(BrandsServiceError::Store(_))),
            "expected Store, got {result:?}"
        );
    }
}
