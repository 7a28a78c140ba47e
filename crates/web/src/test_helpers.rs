//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    assets::MockAssetStore,
    auth::{AccessTokenUuid, MockAuthService},
    context::AppContext,
    domain::products::{
        MockProductsService,
        records::{ProductRecord, ProductUuid},
    },
};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::{SessionSettings, State},
    views::{ViewError, Views},
};

pub(crate) const TEST_TOKEN_UUID: AccessTokenUuid = AccessTokenUuid::from_uuid(Uuid::nil());

/// Marks every request as signed in, standing in for the auth hoop.
#[salvo::handler]
pub(crate) async fn sign_in(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(Session {
        token: TEST_TOKEN_UUID,
    });
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate().never();

    auth
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_assets_mock() -> MockAssetStore {
    let mut assets = MockAssetStore::new();

    assets.expect_store().never();
    assets.expect_remove().never();
    assets.expect_path().never();

    assets
}

pub(crate) fn app_context(
    products: MockProductsService,
    auth: MockAuthService,
    assets: MockAssetStore,
) -> AppContext {
    AppContext {
        products: Arc::new(products),
        auth: Arc::new(auth),
        assets: Arc::new(assets),
    }
}

pub(crate) fn state_with(app: AppContext) -> Result<Arc<State>, ViewError> {
    Ok(State::shared(app, Views::new()?, SessionSettings::default()))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Result<Arc<State>, ViewError> {
    state_with(app_context(
        strict_products_mock(),
        auth,
        strict_assets_mock(),
    ))
}

/// Serve `route` as a signed-in user.
pub(crate) fn products_service(
    products: MockProductsService,
    route: Router,
) -> Result<Service, ViewError> {
    let state = state_with(app_context(
        products,
        strict_auth_mock(),
        strict_assets_mock(),
    ))?;

    Ok(Service::new(
        Router::new().hoop(inject(state)).hoop(sign_in).push(route),
    ))
}

/// Serve `route` without a session.
pub(crate) fn anonymous_products_service(
    products: MockProductsService,
    route: Router,
) -> Result<Service, ViewError> {
    let state = state_with(app_context(
        products,
        strict_auth_mock(),
        strict_assets_mock(),
    ))?;

    Ok(Service::new(Router::new().hoop(inject(state)).push(route)))
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        featured_image: None,
        inventory_count: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// `Location` header of a response, if any.
pub(crate) fn location(res: &Response) -> Option<&str> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}
