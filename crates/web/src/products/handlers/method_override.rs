//! HTML Form Method Override
//!
//! Browsers can only submit forms with GET or POST. Product forms carry the
//! intended verb in a hidden `_method` field, which routes a POST to a member
//! URL onto update or destroy.

use salvo::prelude::*;

use crate::{
    forms::overridden_method,
    products::handlers::{destroy::destroy_product, update::update_product},
};

/// Dispatches `POST /products/{product}` by its `_method` field.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    match overridden_method(req).await?.as_deref() {
        Some("patch" | "put") => update_product(req, depot, res).await,
        Some("delete") => destroy_product(req, depot, res).await,
        _ => Err(StatusError::method_not_allowed()),
    }
}
