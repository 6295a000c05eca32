//! Orders

mod errors;
pub(crate) mod handlers;
mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use responses::OrderResponse;
