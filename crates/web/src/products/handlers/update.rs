//! Update Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::domain::products::{ProductsServiceError, data::ProductDraft};
use tracing::{Span, field::Empty, info};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        lookup::{find_product, product_path},
        params::expect_product_params,
        views::{FormPage, ProductForm},
    },
    state::State,
    views::View,
};

/// Product Update Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    update_product(req, depot, res).await
}

/// Applies the submitted form to the product named by the path.
///
/// The product is looked up before the form is read, so an unknown id is a
/// 404 and nothing is written.
#[tracing::instrument(name = "products.update", skip_all, fields(product_uuid = Empty), err)]
pub(crate) async fn update_product(
    req: &mut Request,
    depot: &Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = find_product(req, state).await?;

    Span::current().record("product_uuid", tracing::field::display(product.uuid));

    let form = req
        .form_data()
        .await
        .or_400("could not parse product form")?;

    let changes = expect_product_params(form).or_400("missing product parameters")?;
    let draft = ProductDraft::from(&product).with_changes(&changes);

    match state
        .app
        .products
        .update_product(product.uuid, changes)
        .await
    {
        Ok(updated) => {
            info!(product_uuid = %updated.uuid, "updated product");

            res.render(Redirect::other(product_path(updated.uuid)));

            Ok(())
        }
        Err(ProductsServiceError::Invalid(errors)) => {
            let page = FormPage {
                signed_in: depot.signed_in(),
                form: ProductForm::for_edit(&product, &draft).with_errors(&errors),
            };

            let html = state
                .views
                .render(View::ProductsEdit, page)
                .or_500("failed to render edit product form")?;

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
            res.render(Text::Html(html));

            Ok(())
        }
        Err(error) => Err(into_status_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::products::{
        MockProductsService, data::ProductChanges, records::ProductUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{location, make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> TestResult<Service> {
        Ok(products_service(
            repo,
            Router::with_path("products/{product}")
                .patch(handler)
                .put(handler),
        )?)
    }

    #[tokio::test]
    async fn test_update_product_redirects_to_show() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_product(uuid)));

        repo.expect_update_product()
            .once()
            .withf(move |u, changes| {
                *u == uuid
                    && *changes
                        == ProductChanges {
                            name: Some("Gadget".to_string()),
                            inventory_count: Some("0".to_string()),
                            ..ProductChanges::default()
                        }
            })
            .return_once(move |_, _| {
                let mut product = make_product(uuid);
                product.name = "Gadget".to_string();
                product.inventory_count = 0;
                Ok(product)
            });

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .form(&[
                ("product[name]", "Gadget"),
                ("product[inventory_count]", "0"),
                ("product[featured]", "true"),
            ])
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), Some(format!("/products/{uuid}").as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn test_put_is_an_update() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        repo.expect_update_product()
            .once()
            .return_once(move |_, _| Ok(make_product(uuid)));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .form(&[("product[description]", "Still a widget")])
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404_without_writing() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        repo.expect_update_product().never();

        let res = TestClient::patch(format!(
            "http://example.com/products/{}",
            ProductUuid::new()
        ))
        .form(&[("product[name]", "Gadget")])
        .send(&make_service(repo)?)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_malformed_id_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product().never();
        repo.expect_update_product().never();

        let res = TestClient::patch("http://example.com/products/not-a-uuid")
            .form(&[("product[name]", "Gadget")])
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_invalid_product_rerenders_edit_form() -> TestResult {
        let uuid = ProductUuid::new();

        let draft = ProductDraft {
            name: "   ".to_string(),
            description: "A widget".to_string(),
            inventory_count: "5".to_string(),
        };

        let Err(errors) = draft.validate(None) else {
            return Err("blank name should not validate".into());
        };

        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        repo.expect_update_product()
            .once()
            .return_once(move |_, _| Err(ProductsServiceError::Invalid(errors)));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .form(&[("product[name]", "   ")])
            .send(&make_service(repo)?)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(
            body.contains(&format!("action=\"/products/{uuid}\"")),
            "edit form posts back to the product"
        );
        assert!(body.contains("field_with_errors"), "invalid field marked");
        assert!(
            body.contains("name=\"product[inventory_count]\" min=\"0\" value=\"5\""),
            "untouched fields keep stored values"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_product_params_returns_400() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        repo.expect_update_product().never();

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .form(&[("name", "Gadget")])
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
