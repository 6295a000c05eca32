//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use wisteria_app::auth::AuthServiceError;

use crate::errors::validation_failed;

pub(crate) const INVALID_LOGIN: &str = "Invalid email or password";
pub(crate) const INVALID_TOKEN: &str = "Could not validate credentials";

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => StatusError::unauthorized().brief(INVALID_LOGIN),
        AuthServiceError::Unauthenticated(_reason) => {
            StatusError::unauthorized().brief(INVALID_TOKEN)
        }
        AuthServiceError::Invalid(errors) => validation_failed(&errors),
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("Admin already exists"),
        AuthServiceError::Token(source) => {
            error!("failed to issue access token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::PasswordHash(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Blocking(source) => {
            error!("password task failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to load admin: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use wisteria_app::{auth::TokenError, validation::ValidationErrors};

    use super::*;

    #[test]
    fn credential_failures_are_401() {
        let login = into_status_error(AuthServiceError::InvalidCredentials);
        let token = into_status_error(AuthServiceError::Unauthenticated(TokenError::Expired));

        assert_eq!(login.code, StatusCode::UNAUTHORIZED);
        assert_eq!(login.brief, INVALID_LOGIN);
        assert_eq!(token.code, StatusCode::UNAUTHORIZED);
        assert_eq!(token.brief, INVALID_TOKEN);
    }

    #[test]
    fn validation_failures_are_422() {
        let status = into_status_error(AuthServiceError::Invalid(ValidationErrors::single(
            "email",
            "must be a valid email address",
        )));

        assert_eq!(status.code, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
