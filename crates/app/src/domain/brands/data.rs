//! Brands Data

use crate::domain::pagination::PageRequest;

/// New Brand Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub name: String,
}

/// Brand Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct BrandUpdate {
    pub name: String,
}

/// Brand listing query as requested by a caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrandsQuery {
    /// Case-insensitive substring of the brand name.
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Brand listing filter handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandsFilter {
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl From<BrandsQuery> for BrandsFilter {
    fn from(query: BrandsQuery) -> Self {
        BrandsFilter {
            search: query.search.filter(|search| !search.is_empty()),
            limit: query.page.limit(),
            offset: query.page.offset(),
        }
    }
}
