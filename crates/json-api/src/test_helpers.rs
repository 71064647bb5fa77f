//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        brands::{
            MockBrandsService,
            records::{BrandRecord, BrandUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_TIMESTAMP: &str = "2026-01-02T03:04:05Z";

pub(crate) fn test_timestamp() -> Timestamp {
    TEST_TIMESTAMP.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

pub(crate) fn make_brand(uuid: BrandUuid, name: &str) -> BrandRecord {
    BrandRecord {
        uuid,
        name: name.to_string(),
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, brand: BrandUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: name.to_string(),
        price: Decimal::new(2550, 2),
        quantity: 5,
        brand_uuid: brand,
        brand: Some(make_brand(brand, "Acme")),
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
        deleted_at: None,
    }
}

fn strict_brands_mock() -> MockBrandsService {
    let mut brands = MockBrandsService::new();

    brands.expect_create_brand().never();
    brands.expect_get_brand().never();
    brands.expect_list_brands().never();
    brands.expect_update_brand().never();
    brands.expect_delete_brand().never();

    brands
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_create_product().never();
    products.expect_get_product().never();
    products.expect_list_products().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

/// Serve `route` over `brands`; any product call fails the test.
pub(crate) fn brands_service(brands: MockBrandsService, route: Router) -> Service {
    service(
        AppContext::new(Arc::new(brands), Arc::new(strict_products_mock())),
        route,
    )
}

/// Serve `route` over `products`; any brand call fails the test.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext::new(Arc::new(strict_brands_mock()), Arc::new(products)),
        route,
    )
}
