//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    products::{ProductResponse, handlers::product_uuid, into_status_error},
    state::State,
};

/// Delete Product Handler
///
/// Marks the product unavailable. The row is kept so past orders can still
/// refer to it, and deleting twice succeeds.
#[endpoint(
    tags("admin"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product marked unavailable"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product id"),
    ),
)]
#[tracing::instrument(name = "products.delete", skip_all, err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let uuid = product_uuid(&id.into_inner())?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_user_or_401()?;

    let product = state
        .app
        .products
        .delete_product(uuid)
        .await
        .map_err(into_status_error)?;

    info!(admin = %admin.uuid, product = %product.uuid, "product withdrawn");

    Ok(Json(product.into()))
}
