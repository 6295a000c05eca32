//! Public Catalog Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{
        ProductsPageResponse, into_status_error,
        query::{Audience, ListingQuery},
    },
    state::State,
};

/// Public Catalog Handler
///
/// Lists available products, newest first. Unavailable products never
/// appear here whatever the query says.
#[endpoint(
    tags("products"),
    summary = "Browse Products",
    responses(
        (status_code = StatusCode::OK, description = "One page of available products"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid query parameter"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    category: QueryParam<String, false>,
    condition: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (filters, page) = ListingQuery {
        page: page.into_inner(),
        per_page: per_page.into_inner(),
        category: category.into_inner(),
        condition: condition.into_inner(),
        search: search.into_inner(),
        available_only: None,
    }
    .parse(Audience::Public)?;

    let products = state
        .app
        .products
        .list_products(filters, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
