//! Get Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::ProductRecord;

use crate::{
    brands::get::BrandResponse, envelope::Envelope, errors::ApiError, extensions::*,
    products::errors::into_api_error, state::State,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub brand_id: Uuid,

    /// The referenced brand, when it was loaded alongside the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into(),
            price: product.price,
            quantity: product.quantity,
            brand_id: product.brand_uuid.into(),
            brand: product.brand.map(Into::into),
            created_at: product.created_at.to_iso8601(),
            updated_at: product.updated_at.to_iso8601(),
            product_name: product.name,
        }
    }
}

/// Get Product Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = req.id_param::<ProductRecord>("Invalid product ID")?;

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(|error| into_api_error(error, "Failed to get product"))?;

    Ok(Envelope::success(
        "Product retrieved successfully",
        product.into(),
    ))
}
