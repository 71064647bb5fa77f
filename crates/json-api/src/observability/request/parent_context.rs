//! Continuing a caller's trace from its `traceparent` header.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// A remote parent context, if the headers carry a valid one. Extraction
/// starts from an empty context so no in-process span is inherited.
fn extract_with(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    let context = propagator.extract_with_context(&Context::new(), &Headers(headers));
    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}
