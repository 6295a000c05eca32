//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use wisteria_app::domain::products::ProductsServiceError;

use crate::errors::validation_failed;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A product with this slug already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Invalid(errors) => validation_failed(&errors),
        ProductsServiceError::InvalidReference | ProductsServiceError::InvalidData => {
            StatusError::unprocessable_entity().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
