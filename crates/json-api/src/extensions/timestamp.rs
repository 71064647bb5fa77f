//! Timestamp rendering for response bodies.

use jiff::Timestamp;

pub(crate) trait TimestampExt {
    /// RFC 3339 in UTC at second precision, e.g. `2026-01-02T03:04:05Z`.
    fn to_iso8601(&self) -> String;
}

impl TimestampExt for Timestamp {
    fn to_iso8601(&self) -> String {
        self.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}
