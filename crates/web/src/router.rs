//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject, catcher::Catcher, prelude::*, size_limiter::max_size,
    trailing_slash::remove_slash,
};

use crate::{
    assets, auth, healthcheck,
    observability::{metrics_handler, request_logging},
    products::handlers as products,
    session,
    state::State,
};

/// Product routes.
///
/// `new` is pushed ahead of `{product}` so it is never taken for an id.
fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(
            Router::new()
                .hoop(auth::require_authentication)
                .post(products::create::handler),
        )
        .push(
            Router::with_path("new")
                .hoop(auth::require_authentication)
                .get(products::new::handler),
        )
        .push(
            Router::with_path("{product}")
                .get(products::show::handler)
                .push(
                    Router::with_path("edit")
                        .hoop(auth::require_authentication)
                        .get(products::edit::handler),
                )
                .push(
                    Router::new()
                        .hoop(auth::require_authentication)
                        .patch(products::update::handler)
                        .put(products::update::handler)
                        .delete(products::destroy::handler)
                        .post(products::method_override::handler),
                ),
        )
}

fn session_router() -> Router {
    Router::with_path("session")
        .post(session::create::handler)
        .delete(session::destroy::handler)
        .push(Router::with_path("new").get(session::new::handler))
}

/// Every route the server answers, wrapped in the shared middleware stack.
pub(crate) fn app_router(state: Arc<State>, max_upload_bytes: u64) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("assets/{key}").get(assets::handler))
        .push(
            Router::new()
                .hoop(max_size(max_upload_bytes))
                .hoop(auth::authenticate)
                .get(products::index::handler)
                .push(session_router())
                .push(products_router()),
        )
}

/// Service with salvo's default error pages.
pub(crate) fn app_service(state: Arc<State>, max_upload_bytes: u64) -> Service {
    Service::new(app_router(state, max_upload_bytes)).catcher(Catcher::default())
}
