//! Brands Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        brands::{
            data::{BrandUpdate, BrandsFilter, NewBrand},
            records::{BrandRecord, BrandUuid},
        },
        pagination::Paged,
        store::StoreError,
    },
};

const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const GET_BRAND_SQL: &str = include_str!("sql/get_brand.sql");
const GET_BRAND_BY_NAME_SQL: &str = include_str!("sql/get_brand_by_name.sql");
const BRAND_EXISTS_SQL: &str = include_str!("sql/brand_exists.sql");
const BRAND_NAME_EXISTS_SQL: &str = include_str!("sql/brand_name_exists.sql");
const COUNT_BRANDS_SQL: &str = include_str!("sql/count_brands.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const UPDATE_BRAND_SQL: &str = include_str!("sql/update_brand.sql");
const LOCK_BRAND_SQL: &str = include_str!("sql/lock_brand.sql");
const COUNT_BRAND_PRODUCTS_SQL: &str = include_str!("sql/count_brand_products.sql");
const DELETE_BRAND_SQL: &str = include_str!("sql/delete_brand.sql");

/// Persistence gateway for brands. Every read ignores soft-deleted rows.
#[automock]
#[async_trait]
pub trait BrandsRepository: Send + Sync {
    /// Insert a new brand.
    async fn create_brand(&self, uuid: BrandUuid, brand: NewBrand)
    -> Result<BrandRecord, StoreError>;

    /// Fetch a live brand, or `None` when absent.
    async fn get_brand(&self, brand: BrandUuid) -> Result<Option<BrandRecord>, StoreError>;

    /// Fetch a live brand by exact name, or `None` when absent.
    async fn get_brand_by_name(&self, name: String) -> Result<Option<BrandRecord>, StoreError>;

    async fn brand_exists(&self, brand: BrandUuid) -> Result<bool, StoreError>;

    async fn brand_name_exists(&self, name: String) -> Result<bool, StoreError>;

    /// One page of brands matching the filter, plus the total match count.
    async fn list_brands(&self, filter: BrandsFilter) -> Result<Paged<BrandRecord>, StoreError>;

    /// Rename a live brand. `NotFound` when no live row matched.
    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<BrandRecord, StoreError>;

    /// Soft-delete a brand. Fails with `HasDependents` while live products
    /// reference it.
    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgBrandsRepository {
    db: Db,
}

impl PgBrandsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BrandsRepository for PgBrandsRepository {
    async fn create_brand(
        &self,
        uuid: BrandUuid,
        brand: NewBrand,
    ) -> Result<BrandRecord, StoreError> {
        query_as::<Postgres, BrandRecord>(CREATE_BRAND_SQL)
            .bind(uuid.into_uuid())
            .bind(brand.name)
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("create brand"))
    }

    async fn get_brand(&self, brand: BrandUuid) -> Result<Option<BrandRecord>, StoreError> {
        query_as::<Postgres, BrandRecord>(GET_BRAND_SQL)
            .bind(brand.into_uuid())
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("get brand"))
    }

    async fn get_brand_by_name(&self, name: String) -> Result<Option<BrandRecord>, StoreError> {
        query_as::<Postgres, BrandRecord>(GET_BRAND_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("get brand by name"))
    }

    async fn brand_exists(&self, brand: BrandUuid) -> Result<bool, StoreError> {
        query_scalar::<Postgres, bool>(BRAND_EXISTS_SQL)
            .bind(brand.into_uuid())
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("check brand existence"))
    }

    async fn brand_name_exists(&self, name: String) -> Result<bool, StoreError> {
        query_scalar::<Postgres, bool>(BRAND_NAME_EXISTS_SQL)
            .bind(name)
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("check brand name existence"))
    }

    async fn list_brands(&self, filter: BrandsFilter) -> Result<Paged<BrandRecord>, StoreError> {
        if filter.limit < 0 || filter.offset < 0 {
            return Err(StoreError::InvalidPagination);
        }

        let pattern = filter.search.as_deref().map(contains_pattern);

        let count: i64 = query_scalar(COUNT_BRANDS_SQL)
            .bind(pattern.as_deref())
            .fetch_one(self.db.pool())
            .await
            .map_err(StoreError::during("count brands"))?;

        let total = u64::try_from(count).unwrap_or_default();

        if total == 0 || u64::try_from(filter.offset).is_ok_and(|offset| offset >= total) {
            return Ok(Paged::empty(total));
        }

        let records = query_as::<Postgres, BrandRecord>(LIST_BRANDS_SQL)
            .bind(pattern.as_deref())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.db.pool())
            .await
            .map_err(StoreError::during("list brands"))?;

        Ok(Paged { records, total })
    }

    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<BrandRecord, StoreError> {
        query_as::<Postgres, BrandRecord>(UPDATE_BRAND_SQL)
            .bind(brand.into_uuid())
            .bind(update.name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(StoreError::during("update brand"))?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), StoreError> {
        let mut tx = self
            .db
            .begin()
            .await
            .map_err(StoreError::during("begin brand deletion"))?;

        // Lock the brand first so a concurrent product insert referencing it
        // waits on its foreign key check until this transaction finishes.
        let locked: Option<Uuid> = query_scalar(LOCK_BRAND_SQL)
            .bind(brand.into_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(StoreError::during("lock brand"))?;

        if locked.is_none() {
            return Err(StoreError::NotFound);
        }

        let dependents: i64 = query_scalar(COUNT_BRAND_PRODUCTS_SQL)
            .bind(brand.into_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::during("check brand usage"))?;

        if dependents > 0 {
            return Err(StoreError::HasDependents);
        }

        let rows_affected = query(DELETE_BRAND_SQL)
            .bind(brand.into_uuid())
            .execute(&mut *tx)
            .await
            .map_err(StoreError::during("delete brand"))?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit()
            .await
            .map_err(StoreError::during("commit brand deletion"))
    }
}

/// `ILIKE` pattern matching `search` anywhere, with wildcards in the input
/// taken literally.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);

    pattern.push('%');

    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

impl<'r> FromRow<'r, PgRow> for BrandRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BrandUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("brand_name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
