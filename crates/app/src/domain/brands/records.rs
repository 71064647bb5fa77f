//! Brand Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Brand UUID
pub type BrandUuid = TypedUuid<BrandRecord>;

/// Brand Record
#[derive(Debug, Clone, PartialEq)]
pub struct BrandRecord {
    pub uuid: BrandUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
