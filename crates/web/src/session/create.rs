//! Sign In Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::auth::AuthServiceError;
use tracing::{error, info};

use crate::{
    extensions::*,
    forms::overridden_method,
    session::{INVALID_TOKEN_MESSAGE, SignInPage, destroy::sign_out},
    state::State,
    views::View,
};

/// Form field holding the access token.
const TOKEN_FIELD: &str = "token";

/// Where a fresh session lands.
const AFTER_SIGN_IN_PATH: &str = "/products";

/// `POST /session`: signs in, or signs out when the form says `_method=delete`.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    match overridden_method(req).await?.as_deref() {
        None => sign_in(req, depot, res).await,
        Some("delete") => sign_out(depot, res),
        Some(_) => Err(StatusError::method_not_allowed()),
    }
}

#[tracing::instrument(name = "session.create", skip_all, err)]
async fn sign_in(req: &mut Request, depot: &Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let form = req
        .form_data()
        .await
        .or_400("could not parse sign in form")?;

    let token = form
        .fields
        .get(TOKEN_FIELD)
        .map(|token| token.trim().to_string())
        .unwrap_or_default();

    if token.is_empty() {
        return reject(state, res);
    }

    match state.app.auth.authenticate(&token).await {
        Ok(token_uuid) => {
            info!(%token_uuid, "signed in");

            res.add_cookie(state.session.session_cookie(token));
            res.render(Redirect::other(AFTER_SIGN_IN_PATH));

            Ok(())
        }
        Err(AuthServiceError::NotFound) => reject(state, res),
        Err(error) => {
            error!("failed to sign in: {error}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn reject(state: &State, res: &mut Response) -> Result<(), StatusError> {
    let page = SignInPage {
        signed_in: false,
        error: Some(INVALID_TOKEN_MESSAGE),
    };

    let html = state
        .views
        .render(View::SessionNew, page)
        .or_500("failed to render sign in form")?;

    res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
    res.render(Text::Html(html));

    Ok(())
}
