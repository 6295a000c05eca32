//! Product Handlers

pub(crate) mod catalog;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod show;
pub(crate) mod update;

use salvo::prelude::StatusError;

use wisteria_app::domain::products::ProductUuid;

use crate::extensions::*;

/// Parse an `{id}` path segment, rejecting anything that is not a UUID.
fn product_uuid(raw: &str) -> Result<ProductUuid, StatusError> {
    raw.parse().or_422("Invalid product id")
}
