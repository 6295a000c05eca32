//! Admin Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::debug;

use crate::{
    extensions::*,
    products::{
        ProductsPageResponse, into_status_error,
        query::{Audience, ListingQuery},
    },
    state::State,
};

/// Admin Product Index Handler
///
/// Lists the whole catalog, unavailable products included unless
/// `available_only=true` is passed.
#[endpoint(
    tags("admin"),
    summary = "List All Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of products"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Could not validate credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Not authenticated"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid query parameter"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    category: QueryParam<String, false>,
    condition: QueryParam<String, false>,
    search: QueryParam<String, false>,
    available_only: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_user_or_401()?;

    let (filters, page) = ListingQuery {
        page: page.into_inner(),
        per_page: per_page.into_inner(),
        category: category.into_inner(),
        condition: condition.into_inner(),
        search: search.into_inner(),
        available_only: available_only.into_inner(),
    }
    .parse(Audience::Admin)?;

    debug!(admin = %admin.uuid, ?filters, "listing catalog");

    let products = state
        .app
        .products
        .list_products(filters, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
