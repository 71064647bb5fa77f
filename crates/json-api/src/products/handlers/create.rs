//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{http::header::LOCATION, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_app::domain::products::data::NewProduct;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
    validation::ValidateRequest,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct CreateProductRequest {
    #[serde(default)]
    #[validate(
        custom(function = "crate::validation::filled"),
        length(max = 255, message = "Failed ! value should be at most 255")
    )]
    pub product_name: String,
    #[validate(
        required(message = "Failed ! This field is required, please fill it"),
        custom(function = "crate::validation::positive_price")
    )]
    pub price: Option<Decimal>,
    #[validate(
        required(message = "Failed ! This field is required, please fill it"),
        range(min = 0, message = "Failed ! Quantity must be 0 or greater")
    )]
    pub quantity: Option<i32>,
    #[validate(
        required(message = "Failed ! This field is required, please fill it"),
        custom(function = "crate::validation::not_nil")
    )]
    pub brand_id: Option<Uuid>,
}

impl ValidateRequest for CreateProductRequest {
    const FIELDS: &'static [&'static str] = &["product_name", "price", "quantity", "brand_id"];
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        request.check()?;

        let (Some(price), Some(quantity), Some(brand)) =
            (request.price, request.quantity, request.brand_id)
        else {
            return Err(ApiError::bad_request("Validation failed", Vec::new()));
        };

        Ok(NewProduct {
            name: request.product_name,
            price,
            quantity,
            brand: brand.into(),
        })
    }
}

/// Create Product Handler
#[handler]
#[tracing::instrument(
    name = "products.create",
    skip_all,
    fields(product.name = tracing::field::Empty, brand.uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CreateProductRequest = req.json_body().await?;
    let product = NewProduct::try_from(request)?;

    let span = tracing::Span::current();

    span.record("product.name", product.name.as_str());
    span.record("brand.uuid", tracing::field::display(product.brand));

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(|error| into_api_error(error, "Failed to create product"))?;

    record_catalog_change(CatalogChange::ProductCreated);

    res.add_header(LOCATION, format!("/api/v1/products/{}", product.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Envelope::created(
        "Product created successfully",
        product.into(),
    ))
}
