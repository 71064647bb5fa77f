//! Route templates for span names and metric labels.

use uuid::Uuid;

/// The request path with every UUID segment replaced by `{id}`, so
/// `/api/v1/brands/<uuid>` and `/api/v1/brands/<other>` share one series.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        assert_eq!(
            route_template("/api/v1/products/0190b5a4-6f0e-7c3a-9f55-6a1f0b2c3d4e"),
            "/api/v1/products/{id}"
        );
    }

    #[test]
    fn other_paths_are_unchanged() {
        assert_eq!(route_template("/api/v1/brands"), "/api/v1/brands");
        assert_eq!(route_template("/api/v1/brands/not-a-uuid"), "/api/v1/brands/not-a-uuid");
        assert_eq!(route_template("/"), "/");
    }
}
