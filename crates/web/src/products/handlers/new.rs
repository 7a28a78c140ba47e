//! New Product Form Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::domain::products::data::ProductDraft;

use crate::{
    extensions::*,
    products::views::{FormPage, ProductForm},
    state::State,
    views::View,
};

/// Renders an empty product form.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = FormPage {
        signed_in: depot.signed_in(),
        form: ProductForm::for_new(&ProductDraft::default()),
    };

    let html = state
        .views
        .render(View::ProductsNew, page)
        .or_500("failed to render new product form")?;

    res.render(Text::Html(html));

    Ok(())
}
