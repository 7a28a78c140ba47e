//! Resolving the product a member route refers to.

use salvo::prelude::*;
use storefront_app::domain::products::records::{ProductRecord, ProductUuid};

use crate::{products::errors::into_status_error, state::State};

/// Path parameter holding the product UUID.
pub(crate) const PRODUCT_PARAM: &str = "product";

/// Parse the `{product}` path parameter.
///
/// Anything that is not a UUID cannot name a product, so it is a 404 rather
/// than a 400.
pub(crate) fn product_uuid(req: &Request) -> Result<ProductUuid, StatusError> {
    req.param::<String>(PRODUCT_PARAM)
        .and_then(|value| value.parse::<ProductUuid>().ok())
        .ok_or_else(StatusError::not_found)
}

/// Load the product named by the path, or fail with 404.
pub(crate) async fn find_product(
    req: &Request,
    state: &State,
) -> Result<ProductRecord, StatusError> {
    let uuid = product_uuid(req)?;

    state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_status_error)
}

pub(crate) fn product_path(uuid: ProductUuid) -> String {
    format!("/products/{uuid}")
}
