//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{ProductResponse, handlers::product_uuid, into_status_error},
    state::State,
};

/// Get Product Handler
#[endpoint(
    tags("admin"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product id"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let uuid = product_uuid(&id.into_inner())?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use wisteria_app::domain::products::{MockProductsService, ProductUuid, ProductsServiceError};

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestApp::default()
            .with_products(products)
            .admin_service(Router::with_path("admin/products/{id}").get(handler))
    }

    #[tokio::test]
    async fn returns_product_by_id() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(make_product(uuid, "rem")));

        let mut res = TestClient::get(format!("http://example.com/admin/products/{uuid}"))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_returns_404() {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/admin/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn malformed_id_returns_422() {
        let mut products = MockProductsService::new();

        products.expect_get_product().never();

        let res = TestClient::get("http://example.com/admin/products/not-a-uuid")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
