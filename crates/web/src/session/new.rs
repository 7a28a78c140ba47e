//! Sign In Form Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, session::SignInPage, state::State, views::View};

#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = SignInPage {
        signed_in: depot.signed_in(),
        error: None,
    };

    let html = state
        .views
        .render(View::SessionNew, page)
        .or_500("failed to render sign in form")?;

    res.render(Text::Html(html));

    Ok(())
}
