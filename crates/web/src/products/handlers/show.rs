//! Show Product Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{
        lookup::find_product,
        views::{ProductView, ShowPage},
    },
    state::State,
    views::View,
};

/// Product Show Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = find_product(req, state).await?;

    let page = ShowPage {
        signed_in: depot.signed_in(),
        product: ProductView::from(&product),
    };

    let html = state
        .views
        .render(View::ProductsShow, page)
        .or_500("failed to render product")?;

    res.render(Text::Html(html));

    Ok(())
}
