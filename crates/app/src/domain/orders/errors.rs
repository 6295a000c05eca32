//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{domain::products::models::ProductUuid, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// An order already exists for the checkout session.
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("product {0} does not exist")]
    UnknownProduct(ProductUuid),

    #[error("product {0} is not available")]
    ProductUnavailable(ProductUuid),

    #[error("order total is out of range")]
    TotalOverflow,

    #[error("invalid order: {0}")]
    Invalid(#[source] ValidationErrors),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<ValidationErrors> for OrdersServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}
