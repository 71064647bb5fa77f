//! Delete Product Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::products::records::ProductRecord;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    products::errors::into_api_error,
    state::State,
};

/// Delete Product Handler
#[handler]
#[tracing::instrument(name = "products.delete", skip_all, fields(product.uuid = tracing::field::Empty))]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Envelope<()>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = req.id_param::<ProductRecord>("Invalid product ID")?;

    tracing::Span::current().record("product.uuid", tracing::field::display(product));

    state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(|error| into_api_error(error, "Failed to delete product"))?;

    record_catalog_change(CatalogChange::ProductDeleted);

    Ok(Envelope::ok("Product deleted successfully"))
}
