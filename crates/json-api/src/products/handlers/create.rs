//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error, requests::CreateProductRequest},
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "A product with this slug already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let request: CreateProductRequest = req.parse_json().await.or_422("Invalid product payload")?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_user_or_401()?;

    let product = state
        .app
        .products
        .create_product(request.into())
        .await
        .map_err(into_status_error)?;

    let location = format!("{}/{}", req.uri().path().trim_end_matches('/'), product.uuid);

    res.add_header(LOCATION, location, true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(admin = %admin.uuid, product = %product.uuid, slug = %product.slug, "product created");

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use wisteria_app::{
        domain::products::{
            MockProductsService, Product, ProductCategory, ProductCondition, ProductsServiceError,
        },
        validation::ValidationErrors,
    };

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestApp::default()
            .with_products(products)
            .admin_service(Router::with_path("admin/products").post(handler))
    }

    fn payload() -> Value {
        json!({
            "name": "Miku Plush",
            "slug": "miku-plush",
            "description": "Soft.",
            "price_cents": 2500,
            "condition": "used",
            "category": "plush",
            "image_url": "https://example.com/miku.jpg",
        })
    }

    #[tokio::test]
    async fn creates_product_with_location() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.slug == "miku-plush"
                    && new.price_cents == 2500
                    && new.condition == ProductCondition::Used
                    && new.category == ProductCategory::Plush
                    && new.is_available
                    && new.quantity == 1
            })
            .return_once(|new| {
                Ok(Product {
                    name: new.name,
                    condition: new.condition,
                    category: new.category,
                    price_cents: new.price_cents,
                    ..make_product(new.uuid, &new.slug)
                })
            });

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&payload())
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.slug, "miku-plush");
        assert_eq!(body.category, ProductCategory::Plush);
        assert_eq!(location, Some(format!("/admin/products/{}", body.id)));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&payload())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            res.take_string()
                .await?
                .contains("A product with this slug already exists")
        );

        Ok(())
    }

    #[tokio::test]
    async fn rejected_fields_return_422() {
        let mut products = MockProductsService::new();

        products.expect_create_product().once().return_once(|_| {
            Err(ProductsServiceError::Invalid(ValidationErrors::single(
                "price_cents",
                "must be at least 1",
            )))
        });

        let mut body = payload();

        body["price_cents"] = json!(0);

        let res = TestClient::post("http://example.com/admin/products")
            .json(&body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn unknown_enum_value_returns_422() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut body = payload();

        body["condition"] = json!("mint");

        let res = TestClient::post("http://example.com/admin/products")
            .json(&body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn malformed_json_returns_422() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/admin/products")
            .raw_json("{\"name\": ")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
