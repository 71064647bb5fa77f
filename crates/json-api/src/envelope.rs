//! Response envelope shared by every endpoint.

use salvo::{
    Response,
    http::StatusCode,
    writing::{Json, Scribe},
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::pagination::PageRequest;

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_page: u64,
}

impl PageMeta {
    pub(crate) fn new(page: PageRequest, total: u64) -> Self {
        Self {
            page: page.page(),
            per_page: page.per_page(),
            total,
            total_page: page.total_pages(total),
        }
    }
}

/// `{code, message, data?, meta?, errors?}`
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub code: u16,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data: None,
            meta: None,
            errors: None,
        }
    }

    /// 200 with `data`.
    pub(crate) fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::with_status(StatusCode::OK, message)
        }
    }

    /// 201 with `data`.
    pub(crate) fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::with_status(StatusCode::CREATED, message)
        }
    }

    /// 200 with one page of `data` and its metadata.
    pub(crate) fn paginated(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            ..Self::with_status(StatusCode::OK, message)
        }
    }
}

impl Envelope<()> {
    /// 200 without a body.
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message)
    }

    pub(crate) fn error(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::with_status(status, message)
        }
    }
}

impl<T> Scribe for Envelope<T>
where
    T: Serialize + Send,
{
    fn render(self, res: &mut Response) {
        res.status_code(
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        );
        res.render(Json(self));
    }
}
