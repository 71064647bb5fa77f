//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::products::data::ProductsQuery;

use crate::{
    envelope::{Envelope, PageMeta},
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
};

fn products_query(req: &Request) -> ProductsQuery {
    ProductsQuery {
        brand: req.lenient_query::<Uuid>("brand_id").map(Into::into),
        min_price: req.lenient_query("min_price"),
        max_price: req.lenient_query("max_price"),
        min_quantity: req.lenient_query("min_qty"),
        max_quantity: req.lenient_query("max_qty"),
        page: req.page_request(),
    }
}

/// Product Index Handler
///
/// Filters by `brand_id` and inclusive `min_price`/`max_price` and
/// `min_qty`/`max_qty` bounds. Unparseable filters are ignored.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = products_query(req);
    let page = query.page;

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(|error| into_api_error(error, "Failed to get products"))?;

    let meta = PageMeta::new(page, products.total);

    Ok(Envelope::paginated(
        "Products retrieved successfully",
        products.records.into_iter().map(Into::into).collect(),
        meta,
    ))
}
