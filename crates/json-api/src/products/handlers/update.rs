//! Update Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_app::domain::products::{data::ProductUpdate, records::ProductRecord};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::{CatalogChange, record_catalog_change},
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
    validation::ValidateRequest,
};

/// Update Product Request
///
/// Every field is optional. Values that do not count as provided (an empty
/// name, a non-positive price, a negative quantity or a nil brand) leave the
/// stored value untouched.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct UpdateProductRequest {
    #[validate(length(max = 255, message = "Failed ! value should be at most 255"))]
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub brand_id: Option<Uuid>,
}

impl ValidateRequest for UpdateProductRequest {
    const FIELDS: &'static [&'static str] = &["product_name"];
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.product_name,
            price: request.price,
            quantity: request.quantity,
            brand: request.brand_id.map(Into::into),
        }
    }
}

/// Product Update Handler
#[handler]
#[tracing::instrument(
    name = "products.update",
    skip_all,
    fields(product.uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = req.id_param::<ProductRecord>("Invalid product ID")?;
    let request: UpdateProductRequest = req.json_body().await?;

    tracing::Span::current().record("product.uuid", tracing::field::display(product));

    request.check()?;

    let product = state
        .app
        .products
        .update_product(product, request.into())
        .await
        .map_err(|error| into_api_error(error, "Failed to update product"))?;

    record_catalog_change(CatalogChange::ProductUpdated);

    Ok(Envelope::success(
        "Product updated successfully",
        product.into(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::{
        brands::records::BrandUuid,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{id}").put(handler))
    }

    #[tokio::test]
    async fn only_sent_fields_are_forwarded() -> TestResult {
        let uuid = ProductUuid::new();
        let brand = BrandUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && *update
                        == ProductUpdate {
                            quantity: Some(7),
                            ..ProductUpdate::default()
                        }
            })
            .return_once(move |_, update| {
                Ok(ProductRecord {
                    quantity: update.quantity.unwrap_or_default(),
                    ..make_product(uuid, "Widget", brand)
                })
            });

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "quantity": 7 }))
            .send(&make_service(products))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Product updated successfully");
        assert_eq!(body.data.map(|product| product.quantity), Some(7));

        Ok(())
    }

    #[tokio::test]
    async fn overlong_name_fails_validation() -> TestResult {
        let mut res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&json!({ "product_name": "x".repeat(256) }))
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: Envelope<Value> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body.errors,
            Some(vec![
                "product_name: Failed ! value should be at most 255".to_string()
            ])
        );

        Ok(())
    }

    #[tokio::test]
    async fn taken_name_is_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| {
                Err(ProductsServiceError::AlreadyExists("Gadget".to_string()))
            });

        let mut res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&json!({ "product_name": "Gadget" }))
            .send(&make_service(products))
            .await;

        let body: Envelope<Value> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Failed to update product");
        assert_eq!(
            body.errors,
            Some(vec!["product with name Gadget already exists".to_string()])
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_is_400() -> TestResult {
        let mut res = TestClient::put("http://example.com/products/not-a-uuid")
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: Envelope<Value> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid product ID");

        Ok(())
    }
}
