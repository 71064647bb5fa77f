//! Correlation ids carried on `x-request-id`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// The caller's id when it sent a non-blank one, otherwise a fresh UUID v7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    pub(super) fn resolve(inbound: Option<String>) -> Self {
        match inbound {
            Some(id) if !id.trim().is_empty() => Self(id),
            _ => Self(Uuid::now_v7().to_string()),
        }
    }

    /// Echo the id on the response. Ids that are not valid header values are
    /// dropped with a warning.
    pub(super) fn apply(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => warn!(request_id = %self, "request id is not a valid header value: {source}"),
        }
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_ids_are_kept() {
        assert_eq!(
            RequestId::resolve(Some("req-123".to_string())).to_string(),
            "req-123"
        );
    }

    #[test]
    fn blank_or_missing_ids_are_generated() {
        for inbound in [None, Some("   ".to_string())] {
            let resolved = RequestId::resolve(inbound);

            assert!(
                Uuid::parse_str(&resolved.to_string()).is_ok_and(|uuid| uuid.get_version_num() == 7),
                "expected a generated v7 uuid, got {resolved}"
            );
        }
    }
}
