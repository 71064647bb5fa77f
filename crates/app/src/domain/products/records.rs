//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::brands::records::{BrandRecord, BrandUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub brand_uuid: BrandUuid,
    /// The referenced brand, when it was loaded alongside and is still live.
    pub brand: Option<BrandRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
