//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    products::{
        ProductResponse, handlers::product_uuid, into_status_error, requests::UpdateProductRequest,
    },
    state::State,
};

/// Update Product Handler
///
/// Applies a sparse patch: fields left out of the body keep their value.
#[endpoint(
    tags("admin"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    request_body = UpdateProductRequest,
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "A product with this slug already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
    ),
)]
#[tracing::instrument(name = "products.update", skip_all, err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let uuid = product_uuid(&id.into_inner())?;
    let request: UpdateProductRequest = req.parse_json().await.or_422("Invalid product patch")?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_user_or_401()?;

    let product = state
        .app
        .products
        .update_product(uuid, request.into())
        .await
        .map_err(into_status_error)?;

    info!(admin = %admin.uuid, product = %product.uuid, "product updated");

    Ok(Json(product.into()))
}
