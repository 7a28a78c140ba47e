//! Product page models handed to the templates.

use serde::Serialize;
use storefront_app::{
    assets::AssetKey,
    domain::products::{
        data::ProductDraft,
        records::ProductRecord,
        validation::{ProductField, ValidationErrors},
    },
};

use crate::products::lookup::product_path;

fn asset_url(key: &AssetKey) -> String {
    format!("/assets/{key}")
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductView {
    pub(crate) uuid: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) inventory_count: u32,
    pub(crate) featured_image_url: Option<String>,
    pub(crate) path: String,
    pub(crate) edit_path: String,
}

impl From<&ProductRecord> for ProductView {
    fn from(product: &ProductRecord) -> Self {
        let path = product_path(product.uuid);

        Self {
            uuid: product.uuid.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            inventory_count: product.inventory_count,
            featured_image_url: product.featured_image.as_ref().map(asset_url),
            edit_path: format!("{path}/edit"),
            path,
        }
    }
}

/// Values and errors of the new / edit product form.
#[derive(Debug, Serialize)]
pub(crate) struct ProductForm {
    action: String,
    method: Option<&'static str>,
    submit_label: &'static str,
    cancel_path: String,
    name: String,
    description: String,
    inventory_count: String,
    featured_image_url: Option<String>,
    errors: Vec<String>,
    invalid_fields: Vec<&'static str>,
}

impl ProductForm {
    /// Form creating a product.
    pub(crate) fn for_new(draft: &ProductDraft) -> Self {
        Self {
            action: "/products".to_string(),
            method: None,
            submit_label: "Create Product",
            cancel_path: "/products".to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            inventory_count: draft.inventory_count.clone(),
            featured_image_url: None,
            errors: Vec::new(),
            invalid_fields: Vec::new(),
        }
    }

    /// Form updating `product`, showing `draft` values.
    pub(crate) fn for_edit(product: &ProductRecord, draft: &ProductDraft) -> Self {
        let path = product_path(product.uuid);

        Self {
            action: path.clone(),
            method: Some("patch"),
            submit_label: "Update Product",
            cancel_path: path,
            featured_image_url: product.featured_image.as_ref().map(asset_url),
            ..Self::for_new(draft)
        }
    }

    #[must_use]
    pub(crate) fn with_errors(mut self, errors: &ValidationErrors) -> Self {
        self.errors = errors.full_messages();
        self.invalid_fields = ProductField::PERMITTED
            .into_iter()
            .filter(|field| errors.on(*field).next().is_some())
            .map(ProductField::as_str)
            .collect();

        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IndexPage {
    pub(crate) signed_in: bool,
    pub(crate) products: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShowPage {
    pub(crate) signed_in: bool,
    pub(crate) product: ProductView,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormPage {
    pub(crate) signed_in: bool,
    pub(crate) form: ProductForm,
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::products::records::ProductUuid;
    use testresult::TestResult;

    use crate::test_helpers::make_product;

    use super::*;

    #[test]
    fn edit_form_posts_back_to_the_product_with_patch() {
        let product = make_product(ProductUuid::new());

        let form = ProductForm::for_edit(&product, &ProductDraft::from(&product));

        assert_eq!(form.action, product_path(product.uuid));
        assert_eq!(form.method, Some("patch"));
        assert_eq!(form.inventory_count, "5");
    }

    #[test]
    fn form_errors_mark_invalid_fields() -> TestResult {
        let draft = ProductDraft {
            name: String::new(),
            description: String::new(),
            inventory_count: "-2".to_string(),
        };

        let Err(errors) = draft.validate(None) else {
            return Err("blank draft should not validate".into());
        };

        let form = ProductForm::for_new(&draft).with_errors(&errors);

        assert_eq!(form.invalid_fields, vec!["name", "inventory_count"]);
        assert_eq!(form.errors.len(), 2);

        Ok(())
    }

    #[test]
    fn product_view_links_featured_image() -> TestResult {
        let mut product = make_product(ProductUuid::new());

        product.featured_image = Some(AssetKey::parse(
            "0190a1b2c3d4e5f60718293a4b5c6d7e.png",
        )?);

        let view = ProductView::from(&product);

        assert_eq!(
            view.featured_image_url.as_deref(),
            Some("/assets/0190a1b2c3d4e5f60718293a4b5c6d7e.png")
        );
        assert_eq!(view.edit_path, format!("/products/{}/edit", product.uuid));

        Ok(())
    }
}
