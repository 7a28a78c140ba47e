//! Destroy Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{Span, field::Empty, info};

use crate::{
    extensions::*,
    products::{errors::into_status_error, lookup::find_product},
    state::State,
};

/// Product Destroy Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    destroy_product(req, depot, res).await
}

/// Deletes the product named by the path and returns to the listing.
#[tracing::instrument(name = "products.destroy", skip_all, fields(product_uuid = Empty), err)]
pub(crate) async fn destroy_product(
    req: &mut Request,
    depot: &Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = find_product(req, state).await?;

    Span::current().record("product_uuid", tracing::field::display(product.uuid));

    state
        .app
        .products
        .delete_product(product.uuid)
        .await
        .map_err(into_status_error)?;

    info!(product_uuid = %product.uuid, "destroyed product");

    res.render(Redirect::other("/products"));

    Ok(())
}
