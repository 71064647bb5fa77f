//! Transport errors rendered as envelopes.

use salvo::{Response, http::StatusCode, writing::Scribe};
use thiserror::Error;

use crate::envelope::Envelope;

const INTERNAL_ERROR: &str = "internal server error";

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Shape, validation, conflict and pagination failures.
    #[error("{message}")]
    BadRequest {
        message: &'static str,
        errors: Vec<String>,
    },

    #[error("{message}")]
    NotFound {
        message: &'static str,
        errors: Vec<String>,
    },

    /// Store and wiring faults. The cause is logged, never rendered.
    #[error("{message}")]
    Internal { message: &'static str },
}

impl ApiError {
    pub(crate) fn bad_request(message: &'static str, errors: Vec<String>) -> Self {
        Self::BadRequest { message, errors }
    }

    pub(crate) fn not_found(message: &'static str, errors: Vec<String>) -> Self {
        Self::NotFound { message, errors }
    }

    pub(crate) fn internal() -> Self {
        Self::Internal {
            message: "Internal server error",
        }
    }

    pub(crate) fn failed(message: &'static str) -> Self {
        Self::Internal { message }
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        let status = self.status();

        let envelope = match self {
            Self::BadRequest { message, errors } | Self::NotFound { message, errors } => {
                Envelope::error(status, message, errors)
            }
            Self::Internal { message } => {
                Envelope::error(status, message, vec![INTERNAL_ERROR.to_string()])
            }
        };

        envelope.render(res);
    }
}
