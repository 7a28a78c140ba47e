//! Product Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found(),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::Invalid(errors) => {
            StatusError::unprocessable_entity().brief(errors.to_string())
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            warn!("product rejected by storage constraints");

            StatusError::bad_request().brief("Invalid product")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Asset(source) => {
            error!("featured image storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
