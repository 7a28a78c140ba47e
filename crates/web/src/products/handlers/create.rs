//! Create Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::domain::products::{ProductsServiceError, data::ProductDraft};
use tracing::info;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        lookup::product_path,
        params::expect_product_params,
        views::{FormPage, ProductForm},
    },
    state::State,
    views::View,
};

/// Product Create Handler
#[handler]
#[tracing::instrument(name = "products.create", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let form = req
        .form_data()
        .await
        .or_400("could not parse product form")?;

    let changes = expect_product_params(form).or_400("missing product parameters")?;
    let draft = ProductDraft::default().with_changes(&changes);

    match state.app.products.create_product(changes).await {
        Ok(product) => {
            info!(product_uuid = %product.uuid, "created product");

            res.render(Redirect::other(product_path(product.uuid)));

            Ok(())
        }
        Err(ProductsServiceError::Invalid(errors)) => {
            let page = FormPage {
                signed_in: depot.signed_in(),
                form: ProductForm::for_new(&draft).with_errors(&errors),
            };

            let html = state
                .views
                .render(View::ProductsNew, page)
                .or_500("failed to render new product form")?;

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
            res.render(Text::Html(html));

            Ok(())
        }
        Err(error) => Err(into_status_error(error)),
    }
}
