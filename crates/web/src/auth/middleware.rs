//! Auth middleware.
//!
//! [`authenticate`] resolves the caller from an `Authorization: Bearer` header
//! or the session cookie and records a [`Session`] in the depot. It never
//! rejects anonymous requests; [`require_authentication`] does that for the
//! routes that need a signed-in user.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::AuthServiceError;
use tracing::{debug, error};

use crate::{extensions::*, state::State};

/// Where anonymous browsers are sent to sign in.
pub(crate) const SIGN_IN_PATH: &str = "/session/new";

#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_ignored) => {
            error!("auth middleware is missing application state");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    if req.headers().contains_key(AUTHORIZATION) {
        let Some(token) = extract_bearer_token(req) else {
            res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
            ctrl.skip_rest();

            return;
        };

        match state.app.auth.authenticate(token).await {
            Ok(token) => depot.insert_session(Session { token }),
            Err(AuthServiceError::NotFound) => {
                res.render(StatusError::unauthorized().brief("Invalid access token"));
                ctrl.skip_rest();

                return;
            }
            Err(error) => {
                fail(&error, res, ctrl);

                return;
            }
        }
    } else if let Some(token) = session_token(req, &state) {
        match state.app.auth.authenticate(&token).await {
            Ok(token) => depot.insert_session(Session { token }),
            Err(AuthServiceError::NotFound) => {
                debug!("discarding stale session cookie");

                res.add_cookie(state.session.expired_cookie());
            }
            Err(error) => {
                fail(&error, res, ctrl);

                return;
            }
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Sends anonymous requests to the sign-in page.
#[salvo::handler]
pub(crate) async fn require_authentication(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if !depot.signed_in() {
        debug!(path = req.uri().path(), "redirecting anonymous request to sign in");

        res.render(Redirect::other(SIGN_IN_PATH));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn fail(error: &AuthServiceError, res: &mut Response, ctrl: &mut FlowCtrl) {
    error!("failed to validate access token: {error}");

    res.render(StatusError::internal_server_error());
    ctrl.skip_rest();
}

fn session_token(req: &Request, state: &State) -> Option<String> {
    req.cookie(&state.session.cookie_name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::auth::{AccessTokenError, AccessTokenUuid, MockAuthService};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::{location, state_with_auth};

    use super::*;

    #[salvo::handler]
    async fn echo_session(depot: &mut Depot, res: &mut Response) {
        let session = depot
            .session()
            .map_or_else(|| "anonymous".to_string(), |session| session.token.to_string());

        res.render(session);
    }

    fn make_service(auth: MockAuthService) -> TestResult<Service> {
        let router = Router::new()
            .hoop(inject(state_with_auth(auth)?))
            .hoop(authenticate)
            .push(Router::with_path("open").get(echo_session))
            .push(
                Router::with_path("private")
                    .hoop(require_authentication)
                    .get(echo_session),
            );

        Ok(Service::new(router))
    }

    fn token_uuid() -> AccessTokenUuid {
        AccessTokenUuid::from_uuid(Uuid::nil())
    }

    #[tokio::test]
    async fn test_anonymous_request_passes_through() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com/open")
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_request_to_private_route_redirects_to_sign_in() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com/private")
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some(SIGN_IN_PATH));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_session_cookie_signs_in() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "sf_v1_abc.def")
            .return_once(|_| Ok(token_uuid()));

        let mut res = TestClient::get("http://example.com/private")
            .add_header(COOKIE, "storefront_session=sf_v1_abc.def", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, token_uuid().to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_session_cookie_is_cleared() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/open")
            .add_header(COOKIE, "storefront_session=sf_v1_revoked.00", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.cookie("storefront_session")
                .map(|cookie| cookie.value().to_string()),
            Some(String::new())
        );
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_bearer_token_signs_in() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(token_uuid()));

        let mut res = TestClient::get("http://example.com/private")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, token_uuid().to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com/open")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_bearer_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com/open")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_token_processing_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_| Err(AuthServiceError::Token(AccessTokenError::InvalidFormat)));

        let res = TestClient::get("http://example.com/open")
            .add_header(COOKIE, "storefront_session=sf_v1_abc.def", true)
            .send(&make_service(auth)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
