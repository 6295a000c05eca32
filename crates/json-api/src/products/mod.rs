//! Products

mod errors;
pub(crate) mod handlers;
mod query;
mod requests;
mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use responses::{ProductResponse, ProductsPageResponse};
