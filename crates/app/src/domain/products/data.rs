//! Products Data

use rust_decimal::Decimal;

use crate::domain::{brands::records::BrandUuid, pagination::PageRequest};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub brand: BrandUuid,
}

impl NewProduct {
    /// Whether every field holds a storable value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && self.price > Decimal::ZERO
            && self.quantity >= 0
            && !self.brand.is_nil()
    }
}

/// Partial product update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub brand: Option<BrandUuid>,
}

impl ProductUpdate {
    /// Drop values that do not count as provided: an empty name, a
    /// non-positive price, a negative quantity or a nil brand.
    #[must_use]
    pub fn provided(self) -> Self {
        Self {
            name: self.name.filter(|name| !name.is_empty()),
            price: self.price.filter(|price| *price > Decimal::ZERO),
            quantity: self.quantity.filter(|quantity| *quantity >= 0),
            brand: self.brand.filter(|brand| !brand.is_nil()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none() && self.brand.is_none()
    }
}

/// Product listing query as requested by a caller. Absent bounds are not
/// applied; present bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductsQuery {
    pub brand: Option<BrandUuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub page: PageRequest,
}

/// Product listing filter handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsFilter {
    pub brand: Option<BrandUuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}

impl From<ProductsQuery> for ProductsFilter {
    fn from(query: ProductsQuery) -> Self {
        ProductsFilter {
            brand: query.brand,
            min_price: query.min_price,
            max_price: query.max_price,
            min_quantity: query.min_quantity,
            max_quantity: query.max_quantity,
            limit: query.page.limit(),
            offset: query.page.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprovided_update_values_are_dropped() {
        let update = ProductUpdate {
            name: Some(String::new()),
            price: Some(Decimal::ZERO),
            quantity: Some(-1),
            brand: Some(BrandUuid::from_uuid(uuid::Uuid::nil())),
        }
        .provided();

        assert!(update.is_empty(), "expected nothing provided, got {update:?}");
    }

    #[test]
    fn zero_quantity_counts_as_provided() {
        let update = ProductUpdate {
            quantity: Some(0),
            ..ProductUpdate::default()
        }
        .provided();

        assert_eq!(update.quantity, Some(0));
    }

    #[test]
    fn zero_bounds_survive_into_the_filter() {
        let filter = ProductsFilter::from(ProductsQuery {
            min_price: Some(Decimal::ZERO),
            min_quantity: Some(0),
            ..ProductsQuery::default()
        });

        assert_eq!(filter.min_price, Some(Decimal::ZERO));
        assert_eq!(filter.min_quantity, Some(0));
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
    }
}
