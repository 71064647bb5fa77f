//! Request parsing helpers.

use std::str::FromStr;

use salvo::{Request, http::ParseError};
use serde::de::DeserializeOwned;
use storefront_app::{domain::pagination::PageRequest, uuids::TypedUuid};

use crate::errors::ApiError;

/// Lenient query parsing plus JSON body and path id extraction mapped to
/// envelope errors.
pub(crate) trait RequestExt {
    /// A query parameter parsed as `T`, or `None` when absent or unparseable.
    /// Surrounding whitespace is ignored.
    fn lenient_query<T: FromStr>(&self, key: &str) -> Option<T>;

    /// A free-text query parameter, exactly as sent.
    fn query_text(&self, key: &str) -> Option<String>;

    /// `page` and `per_page`, coerced into range.
    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.lenient_query("page"), self.lenient_query("per_page"))
    }

    /// The `{id}` path segment as a typed uuid, or a 400 with `message`.
    fn id_param<T>(&self, message: &'static str) -> Result<TypedUuid<T>, ApiError>;

    /// Decode the JSON body, or a 400 "Invalid request body".
    async fn json_body<T: DeserializeOwned + Send>(&mut self) -> Result<T, ApiError>;
}

impl RequestExt for Request {
    fn lenient_query<T: FromStr>(&self, key: &str) -> Option<T> {
        self.query::<String>(key)
            .and_then(|value| value.trim().parse().ok())
    }

    fn query_text(&self, key: &str) -> Option<String> {
        self.query::<String>(key)
    }

    fn id_param<T>(&self, message: &'static str) -> Result<TypedUuid<T>, ApiError> {
        let raw = self.param::<String>("id").unwrap_or_default();

        raw.parse()
            .map_err(|error: uuid::Error| ApiError::bad_request(message, vec![error.to_string()]))
    }

    async fn json_body<T: DeserializeOwned + Send>(&mut self) -> Result<T, ApiError> {
        self.parse_json::<T>().await.map_err(|error: ParseError| {
            ApiError::bad_request("Invalid request body", vec![error.to_string()])
        })
    }
}
