//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{auth::middleware::SIGN_IN_PATH, extensions::*, state::State};

#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    sign_out(depot, res)
}

/// Expire the session cookie and return to the sign-in page.
pub(crate) fn sign_out(depot: &Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Some(session) = depot.session() {
        info!(token_uuid = %session.token, "signed out");
    }

    res.add_cookie(state.session.expired_cookie());
    res.render(Redirect::other(SIGN_IN_PATH));

    Ok(())
}
