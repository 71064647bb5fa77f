//! Update Brand Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use storefront_app::domain::brands::{data::BrandUpdate, records::BrandRecord};

use crate::{
    brands::{errors::into_api_error, get::BrandResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    state::State,
    validation::ValidateRequest,
};

/// Update Brand Request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct UpdateBrandRequest {
    #[serde(default)]
    #[validate(
        custom(function = "crate::validation::filled"),
        length(max = 255, message = "Failed ! value should be at most 255")
    )]
    pub brand_name: String,
}

impl ValidateRequest for UpdateBrandRequest {
    const FIELDS: &'static [&'static str] = &["brand_name"];
}

/// Brand Update Handler
#[handler]
#[tracing::instrument(
    name = "brands.update",
    skip_all,
    fields(brand.uuid = tracing::field::Empty, brand.name = tracing::field::Empty)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<BrandResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let brand = req.id_param::<BrandRecord>("Invalid brand ID")?;
    let request: UpdateBrandRequest = req.json_body().await?;

    let span = tracing::Span::current();

    span.record("brand.uuid", tracing::field::display(brand));
    span.record("brand.name", request.brand_name.as_str());

    request.check()?;

    let brand = state
        .app
        .brands
        .update_brand(
            brand,
            BrandUpdate {
                name: request.brand_name,
            },
        )
        .await
        .map_err(|error| into_api_error(error, "Failed to update brand"))?;

    record_catalog_change(CatalogChange::BrandUpdated);

    Ok(Envelope::success("Brand updated successfully", brand.into()))
}
