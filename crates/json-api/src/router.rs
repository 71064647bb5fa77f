//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{affix_state::inject, prelude::*, timeout::Timeout, trailing_slash::remove_slash};

use crate::{
    brands, healthcheck,
    observability::{metrics_handler, request_logging},
    products,
    state::State,
};

/// The `/api/v1` resource routes.
pub(crate) fn api_router() -> Router {
    Router::with_path("api/v1")
        .push(
            Router::with_path("brands")
                .get(brands::index::handler)
                .post(brands::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(brands::get::handler)
                        .put(brands::update::handler)
                        .delete(brands::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

/// Every route behind the shared middleware stack.
pub(crate) fn app_router(state: Arc<State>, request_timeout: Duration) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(Timeout::new(request_timeout))
        .hoop(inject(state))
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(api_router())
}
