//! Product form parameters.
//!
//! Browsers submit product attributes nested as `product[<attribute>]`. Only
//! the permitted attributes are read; everything else is dropped before the
//! values reach the products service.

use salvo::http::{form::FormData, header::CONTENT_TYPE};
use storefront_app::{
    assets::ImageUpload,
    domain::products::{data::ProductChanges, validation::ProductField},
};
use thiserror::Error;
use tracing::debug;

/// Root key of the nested product parameters.
const PRODUCT_KEY: &str = "product";

/// The product attributes a form may assign.
pub(crate) const PERMITTED_PRODUCT_FIELDS: [ProductField; 4] = ProductField::PERMITTED;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParamsError {
    #[error("param is missing or the value is empty: {0}")]
    Missing(&'static str),
}

/// Attribute name of a `product[<attribute>]` key.
fn nested_attribute(key: &str) -> Option<&str> {
    key.strip_prefix(PRODUCT_KEY)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

fn nested_key(field: ProductField) -> String {
    format!("{PRODUCT_KEY}[{}]", field.as_str())
}

/// Extract the permitted product attributes from a submitted form.
///
/// # Errors
///
/// Fails with [`ParamsError::Missing`] when the form carries no product
/// parameters at all.
pub(crate) fn expect_product_params(form: &FormData) -> Result<ProductChanges, ParamsError> {
    let mut submitted = form
        .fields
        .keys()
        .chain(form.files.keys())
        .filter_map(|key| nested_attribute(key))
        .peekable();

    if submitted.peek().is_none() {
        return Err(ParamsError::Missing(PRODUCT_KEY));
    }

    for attribute in submitted {
        if !PERMITTED_PRODUCT_FIELDS
            .iter()
            .any(|field| field.as_str() == attribute)
        {
            debug!(attribute, "unpermitted product parameter dropped");
        }
    }

    let text = |field: ProductField| form.fields.get(&nested_key(field)).cloned();

    let featured_image = form
        .files
        .get(&nested_key(ProductField::FeaturedImage))
        .filter(|part| part.size() > 0)
        .map(|part| ImageUpload {
            file_name: part.name().map(ToString::to_string),
            content_type: part
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string),
            path: part.path().clone(),
        });

    Ok(ProductChanges {
        name: text(ProductField::Name),
        description: text(ProductField::Description),
        inventory_count: text(ProductField::InventoryCount),
        featured_image,
    })
}
