//! Brand Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::brands::data::BrandsQuery;

use crate::{
    brands::{errors::into_api_error, get::BrandResponse},
    envelope::{Envelope, PageMeta},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Brand Index Handler
///
/// Accepts `page`, `per_page` and `search`; malformed values fall back to
/// the defaults.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<Vec<BrandResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = req.page_request();

    let brands = state
        .app
        .brands
        .list_brands(BrandsQuery {
            search: req.query_text("search"),
            page,
        })
        .await
        .map_err(|error| into_api_error(error, "Failed to get brands"))?;

    let meta = PageMeta::new(page, brands.total);

    Ok(Envelope::paginated(
        "Brands retrieved successfully",
        brands.records.into_iter().map(Into::into).collect(),
        meta,
    ))
}
