//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        views::{IndexPage, ProductView},
    },
    state::State,
    views::View,
};

/// Products Index Handler
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    let page = IndexPage {
        signed_in: depot.signed_in(),
        products: products.iter().map(ProductView::from).collect(),
    };

    let html = state
        .views
        .render(View::ProductsIndex, page)
        .or_500("failed to render products index")?;

    res.render(Text::Html(html));

    Ok(())
}
