//! Get Brand Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::brands::records::BrandRecord;

use crate::{
    brands::errors::into_api_error, envelope::Envelope, errors::ApiError, extensions::*,
    state::State,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BrandResponse {
    pub id: Uuid,
    pub brand_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BrandRecord> for BrandResponse {
    fn from(brand: BrandRecord) -> Self {
        BrandResponse {
            id: brand.uuid.into(),
            created_at: brand.created_at.to_iso8601(),
            updated_at: brand.updated_at.to_iso8601(),
            brand_name: brand.name,
        }
    }
}

/// Get Brand Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<BrandResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let brand = req.id_param::<BrandRecord>("Invalid brand ID")?;

    let brand = state
        .app
        .brands
        .get_brand(brand)
        .await
        .map_err(|error| into_api_error(error, "Failed to get brand"))?;

    Ok(Envelope::success(
        "Brand retrieved successfully",
        brand.into(),
    ))
}
