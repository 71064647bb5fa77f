//! Delete Brand Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::brands::records::BrandRecord;

use crate::{
    brands::errors::into_api_error,
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    state::State,
};

/// Delete Brand Handler
///
/// Refused with a 400 while any live product still references the brand.
#[handler]
#[tracing::instrument(name = "brands.delete", skip_all, fields(brand.uuid = tracing::field::Empty))]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Envelope<()>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let brand = req.id_param::<BrandRecord>("Invalid brand ID")?;

    tracing::Span::current().record("brand.uuid", tracing::field::display(brand));

    state
        .app
        .brands
        .delete_brand(brand)
        .await
        .map_err(|error| into_api_error(error, "Failed to delete brand"))?;

    record_catalog_change(CatalogChange::BrandDeleted);

    Ok(Envelope::ok("Brand deleted successfully"))
}
