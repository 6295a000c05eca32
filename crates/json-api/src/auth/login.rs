//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use wisteria_app::auth::AccessToken;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Admin email address, matched case-insensitively
    pub email: String,

    /// Admin password
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type.to_owned(),
        }
    }
}

/// Login Handler
///
/// Exchanges admin credentials for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    request_body = LoginRequest,
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Too many login attempts"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let request: LoginRequest = req.parse_json().await.or_422("Invalid login payload")?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use wisteria_app::{
        auth::{AuthServiceError, MockAuthService},
        validation::ValidationErrors,
    };

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        TestApp::default()
            .with_auth(auth)
            .service(Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn login_returns_bearer_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|email, password| email == "admin@wisteria.com" && password == "admin123")
            .return_once(|_, _| Ok(AccessToken::bearer("signed.token.value".to_string())));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "admin@wisteria.com", "password": "admin123" }))
            .send(&make_service(auth))
            .await;

        let body: TokenResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.access_token, "signed.token.value");
        assert_eq!(body.token_type, "bearer");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_credentials_return_401() {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "admin@wisteria.com", "password": "nope" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn invalid_email_returns_422() {
        let mut auth = MockAuthService::new();

        auth.expect_login().once().return_once(|_, _| {
            Err(AuthServiceError::Invalid(ValidationErrors::single(
                "email",
                "must be a valid email address",
            )))
        });

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "not-an-email", "password": "admin123" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn missing_fields_return_422_without_calling_the_service() {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "admin@wisteria.com" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
