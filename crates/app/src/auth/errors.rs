//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::{
    auth::{PasswordHashError, TokenError},
    validation::ValidationErrors,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown email or wrong password; the two are never distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Any bearer token rejection.
    #[error("could not validate credentials")]
    Unauthenticated(#[source] TokenError),

    #[error("admin already exists")]
    AlreadyExists,

    #[error("invalid admin details: {0}")]
    Invalid(#[source] ValidationErrors),

    #[error("failed to issue token")]
    Token(#[source] TokenError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    #[error("password task failed")]
    Blocking(#[from] JoinError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<ValidationErrors> for AuthServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}
