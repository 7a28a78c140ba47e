//! Edit Product Form Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::domain::products::data::ProductDraft;

use crate::{
    extensions::*,
    products::{
        lookup::find_product,
        views::{FormPage, ProductForm},
    },
    state::State,
    views::View,
};

/// Renders the product form pre-filled with the stored values.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = find_product(req, state).await?;

    let page = FormPage {
        signed_in: depot.signed_in(),
        form: ProductForm::for_edit(&product, &ProductDraft::from(&product)),
    };

    let html = state
        .views
        .render(View::ProductsEdit, page)
        .or_500("failed to render edit product form")?;

    res.render(Text::Html(html));

    Ok(())
}
