//! Product Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

/// Map a service failure onto the envelope for the operation named by
/// `message`, e.g. "Failed to update product".
pub(crate) fn into_api_error(error: ProductsServiceError, message: &'static str) -> ApiError {
    let errors = vec![error.to_string()];

    match error {
        ProductsServiceError::NotFound | ProductsServiceError::BrandNotFound(_) => {
            ApiError::not_found(message, errors)
        }
        ProductsServiceError::AlreadyExists(_)
        | ProductsServiceError::InvalidPagination
        | ProductsServiceError::InvalidData => ApiError::bad_request(message, errors),
        ProductsServiceError::Store(source) => {
            error!(error = %source, "{message}");

            ApiError::failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::brands::records::BrandUuid;

    use super::*;

    #[test]
    fn unknown_brand_is_not_found_and_named() {
        let brand = BrandUuid::new();
        let error = into_api_error(
            ProductsServiceError::BrandNotFound(brand),
            "Failed to create product",
        );

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert!(
            matches!(&error, ApiError::NotFound { errors, .. } if errors == &[format!("brand with ID {brand} not found")]),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn duplicate_names_are_bad_requests() {
        let error = into_api_error(
            ProductsServiceError::AlreadyExists("Widget".to_string()),
            "Failed to create product",
        );

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
