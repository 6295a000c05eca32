//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use wisteria_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        other => {
            error!("order lookup failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
