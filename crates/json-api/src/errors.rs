//! Shared HTTP error shapes.

use salvo::prelude::StatusError;

use wisteria_app::validation::ValidationErrors;

/// A 422 listing every rejected field as `field: message`.
pub(crate) fn validation_failed(errors: &ValidationErrors) -> StatusError {
    StatusError::unprocessable_entity()
        .brief("Validation failed")
        .detail(errors.to_string())
}
