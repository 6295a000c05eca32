//! Admin auth gate.
//!
//! A request without an `Authorization` header is refused with 403. Any
//! presented credential that does not resolve to an admin gets the same 401,
//! whatever the reason.

use std::sync::Arc;

use salvo::{
    http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE},
    prelude::*,
};
use tracing::{debug, error};

use wisteria_app::auth::AuthServiceError;

use crate::{
    auth::{INVALID_TOKEN, into_status_error},
    extensions::*,
    state::State,
};

const NOT_AUTHENTICATED: &str = "Not authenticated";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        reject(res, ctrl, StatusError::forbidden().brief(NOT_AUTHENTICATED));

        return;
    };

    let Some(token) = bearer_token(header) else {
        challenge(res, ctrl);

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            reject(res, ctrl, status);

            return;
        }
    };

    let authenticated = state.app.auth.authenticate_bearer(token).await;

    match authenticated {
        Ok(admin) => {
            depot.insert_admin_user(admin);

            ctrl.call_next(req, depot, res).await;
        }
        Err(AuthServiceError::Unauthenticated(reason)) => {
            debug!("rejected bearer token: {reason}");

            challenge(res, ctrl);
        }
        Err(other) => {
            error!("failed to authenticate bearer token: {other}");

            reject(res, ctrl, into_status_error(other));
        }
    }
}

/// The token from a `Bearer <token>` header value, scheme case-insensitive.
fn bearer_token(header: &HeaderValue) -> Option<&str> {
    let (scheme, token) = header.to_str().ok()?.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn challenge(res: &mut Response, ctrl: &mut FlowCtrl) {
    res.headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));

    reject(res, ctrl, StatusError::unauthorized().brief(INVALID_TOKEN));
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, status: StatusError) {
    res.render(status);
    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use wisteria_app::auth::{AdminUser, AdminUserUuid, MockAuthService, TokenError};

    use crate::test_helpers::TestApp;

    use super::*;

    #[salvo::handler]
    async fn echo_admin(depot: &mut Depot, res: &mut Response) {
        let email = depot
            .admin_user_or_401()
            .map_or_else(|_| "missing".to_string(), |admin| admin.email.clone());

        res.render(email);
    }

    fn make_service(auth: MockAuthService) -> Service {
        TestApp::default()
            .with_auth(auth)
            .service(Router::new().hoop(handler).push(Router::new().get(echo_admin)))
    }

    fn admin() -> AdminUser {
        AdminUser {
            uuid: AdminUserUuid::new(),
            email: "admin@wisteria.com".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn www_authenticate(res: &Response) -> Option<&str> {
        res.headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn missing_authorization_header_is_forbidden() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(www_authenticate(&res), None);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic YWRtaW46YWRtaW4=", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(www_authenticate(&res), Some("Bearer"));
    }

    #[tokio::test]
    async fn every_token_rejection_looks_the_same() {
        for reason in [
            TokenError::Expired,
            TokenError::Malformed,
            TokenError::BadSignature,
            TokenError::UnknownSubject,
        ] {
            let mut auth = MockAuthService::new();

            auth.expect_authenticate_bearer()
                .once()
                .withf(|token| token == "abc.def.ghi")
                .return_once(move |_| Err(AuthServiceError::Unauthenticated(reason)));

            let res = TestClient::get("http://example.com")
                .add_header(AUTHORIZATION, "Bearer abc.def.ghi", true)
                .send(&make_service(auth))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
            assert_eq!(www_authenticate(&res), Some("Bearer"));
        }
    }

    #[tokio::test]
    async fn valid_token_injects_admin() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc.def.ghi")
            .return_once(|_| Ok(admin()));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer abc.def.ghi", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admin@wisteria.com");

        Ok(())
    }

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let parse = |value: &'static str| {
            bearer_token(&HeaderValue::from_static(value)).map(str::to_owned)
        };

        assert_eq!(parse("Bearer abc").as_deref(), Some("abc"));
        assert_eq!(parse("BEARER  abc ").as_deref(), Some("abc"));
        assert_eq!(parse("Bearer "), None);
        assert_eq!(parse("Bearer"), None);
        assert_eq!(parse("Token abc"), None);
    }
}
