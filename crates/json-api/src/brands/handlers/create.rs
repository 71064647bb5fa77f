//! Create Brand Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use serde::{Deserialize, Serialize};
use validator::Validate;

use storefront_app::domain::brands::data::NewBrand;

use crate::{
    brands::{errors::into_api_error, get::BrandResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    state::State,
    validation::ValidateRequest,
};

/// Create Brand Request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct CreateBrandRequest {
    #[serde(default)]
    #[validate(
        custom(function = "crate::validation::filled"),
        length(max = 255, message = "Failed ! value should be at most 255")
    )]
    pub brand_name: String,
}

impl ValidateRequest for CreateBrandRequest {
    const FIELDS: &'static [&'static str] = &["brand_name"];
}

/// Create Brand Handler
#[handler]
#[tracing::instrument(name = "brands.create", skip_all, fields(brand.name = tracing::field::Empty))]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<BrandResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CreateBrandRequest = req.json_body().await?;

    tracing::Span::current().record("brand.name", request.brand_name.as_str());

    request.check()?;

    let brand = state
        .app
        .brands
        .create_brand(NewBrand {
            name: request.brand_name,
        })
        .await
        .map_err(|error| into_api_error(error, "Failed to create brand"))?;

    record_catalog_change(CatalogChange::BrandCreated);

    res.add_header(LOCATION, format!("/api/v1/brands/{}", brand.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Envelope::created("Brand created successfully", brand.into()))
}
