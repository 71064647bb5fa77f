//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::Db,
    domain::{
        brands::records::{BrandRecord, BrandUuid},
        pagination::Paged,
        products::{
            data::{NewProduct, ProductUpdate, ProductsFilter},
            records::{ProductRecord, ProductUuid},
        },
        store::StoreError,
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_BY_NAME_SQL: &str = include_str!("sql/get_product_by_name.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const PRODUCT_NAME_EXISTS_SQL: &str = include_str!("sql/product_name_exists.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Persistence gateway for products. Reads embed the referenced brand when it
/// is still live and ignore soft-deleted products.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn create_product(
        &self,
        uuid: ProductUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, StoreError>;

    /// Fetch a live product, or `None` when absent.
    async fn get_product(&self, product: ProductUuid)
    -> Result<Option<ProductRecord>, StoreError>;

    async fn get_product_by_name(&self, name: String)
    -> Result<Option<ProductRecord>, StoreError>;

    async fn product_exists(&self, product: ProductUuid) -> Result<bool, StoreError>;

    async fn product_name_exists(&self, name: String) -> Result<bool, StoreError>;

    /// One page of products matching the filter, plus the total match count.
    async fn list_products(
        &self,
        filter: ProductsFilter,
    ) -> Result<Paged<ProductRecord>, StoreError>;

    /// Overwrite the provided columns of a live product. `NotFound` when no
    /// live row matched.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, StoreError>;

    /// Soft-delete a product. `NotFound` when no live row matched.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn create_product(
        &self,
        uuid: ProductUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, StoreError> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(uuid.into_uuid())
            .bind(product.name)
            .bind(product.price)
            .bind(product.quantity)
            .bind(product.brand.into_uuid())
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("create product"))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("get product"))
    }

    async fn get_product_by_name(
        &self,
        name: String,
    ) -> Result<Option<ProductRecord>, StoreError> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("get product by name"))
    }

    async fn product_exists(&self, product: ProductUuid) -> Result<bool, StoreError> {
        query_scalar::<Postgres, bool>(PRODUCT_EXISTS_SQL)
            .bind(product.into_uuid())
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("check product existence"))
    }

    async fn product_name_exists(&self, name: String) -> Result<bool, StoreError> {
        query_scalar::<Postgres, bool>(PRODUCT_NAME_EXISTS_SQL)
            .bind(name)
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("check product name existence"))
    }

    async fn list_products(
        &self,
        filter: ProductsFilter,
    ) -> Result<Paged<ProductRecord>, StoreError> {
        if filter.limit < 0 || filter.offset < 0 {
            return Err(StoreError::InvalidPagination);
        }

        let brand = filter.brand.map(BrandUuid::into_uuid);

        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(brand)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_quantity)
            .bind(filter.max_quantity)
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("count products"))?;

        let total = u64::try_from(count).unwrap_or_default();

        if total == 0 || u64::try_from(filter.offset).is_ok_and(|offset| offset >= total) {
            return Ok(Paged::empty(total));
        }

        let records = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(brand)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_quantity)
            .bind(filter.max_quantity)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.db.pool())
            .await
            .map_err(StoreError::during("list products"))?;

        Ok(Paged { records, total })
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, StoreError> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.price)
            .bind(update.quantity)
            .bind(update.brand.map(BrandUuid::into_uuid))
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("update product"))?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), StoreError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await
            .map_err(StoreError::during("delete product"))?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let brand_uuid = BrandUuid::from_uuid(row.try_get("brand_id")?);

        let brand_name: Option<String> = row.try_get("brand_name")?;
        let brand_created_at: Option<SqlxTimestamp> = row.try_get("brand_created_at")?;
        let brand_updated_at: Option<SqlxTimestamp> = row.try_get("brand_updated_at")?;

        let brand = match (brand_name, brand_created_at, brand_updated_at) {
            (Some(name), Some(created_at), Some(updated_at)) => Some(BrandRecord {
                uuid: brand_uuid,
                name,
                created_at: created_at.to_jiff(),
                updated_at: updated_at.to_jiff(),
                deleted_at: None,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("product_name")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            brand_uuid,
            brand,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
