//! Brand Errors

use tracing::error;

use storefront_app::domain::brands::BrandsServiceError;

use crate::errors::ApiError;

/// Map a service failure onto the envelope for the operation named by
/// `message`, e.g. "Failed to get brand".
pub(crate) fn into_api_error(error: BrandsServiceError, message: &'static str) -> ApiError {
    let errors = vec![error.to_string()];

    match error {
        BrandsServiceError::NotFound => ApiError::not_found(message, errors),
        BrandsServiceError::AlreadyExists(_)
        | BrandsServiceError::HasProducts
        | BrandsServiceError::InvalidPagination
        | BrandsServiceError::InvalidData => ApiError::bad_request(message, errors),
        BrandsServiceError::Store(source) => {
            error!(error = %source, "{message}");

            ApiError::failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::store::StoreError;

    use super::*;

    #[test]
    fn conflicts_are_bad_requests_naming_the_brand() {
        let error = into_api_error(
            BrandsServiceError::AlreadyExists("Acme".to_string()),
            "Failed to create brand",
        );

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(
            matches!(&error, ApiError::BadRequest { errors, .. } if errors == &["brand with name Acme already exists"]),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn missing_brands_are_not_found() {
        let error = into_api_error(BrandsServiceError::NotFound, "Failed to get brand");

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_faults_hide_their_cause() {
        let error = into_api_error(
            BrandsServiceError::Store(StoreError::UniqueViolation),
            "Failed to get brands",
        );

        assert!(
            matches!(error, ApiError::Internal { message: "Failed to get brands" }),
            "unexpected error: {error:?}"
        );
    }
}
