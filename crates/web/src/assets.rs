//! Featured Image Handler

use std::sync::Arc;

use salvo::{fs::NamedFile, prelude::*};
use storefront_app::assets::AssetKey;
use tracing::debug;

use crate::{extensions::*, state::State};

/// Path parameter holding the asset key.
pub(crate) const KEY_PARAM: &str = "key";

/// Streams a stored featured image.
///
/// Keys are re-validated before touching the filesystem; anything that is not
/// a generated key is a 404.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let key = req
        .param::<String>(KEY_PARAM)
        .and_then(|value| AssetKey::parse(&value).ok())
        .ok_or_else(StatusError::not_found)?;

    let file = NamedFile::builder(state.app.assets.path(&key))
        .build()
        .await
        .map_err(|error| {
            debug!(%key, "asset unavailable: {error}");

            StatusError::not_found()
        })?;

    file.send(req.headers(), res).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::assets::MockAssetStore;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::test_helpers::{app_context, state_with, strict_auth_mock, strict_products_mock};

    use super::*;

    const KEY: &str = "0190a1b2c3d4e5f60718293a4b5c6d7e.png";

    fn make_service(assets: MockAssetStore) -> TestResult<Service> {
        let state = state_with(app_context(
            strict_products_mock(),
            strict_auth_mock(),
            assets,
        ))?;

        let router = Router::new()
            .hoop(inject(state))
            .push(Router::with_path("assets/{key}").get(handler));

        Ok(Service::new(router))
    }

    #[tokio::test]
    async fn test_serves_stored_image() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join(KEY);

        std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake")?;

        let mut assets = MockAssetStore::new();

        assets
            .expect_path()
            .once()
            .withf(|key| key.as_str() == KEY)
            .return_once(move |_| path);

        let mut res = TestClient::get(format!("http://example.com/assets/{KEY}"))
            .send(&make_service(assets)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("image/png")
        );
        assert_eq!(res.take_bytes(None).await?.as_ref(), b"\x89PNG\r\n\x1a\nfake");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_image_returns_404() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join(KEY);

        let mut assets = MockAssetStore::new();

        assets.expect_path().once().return_once(move |_| path);

        let res = TestClient::get(format!("http://example.com/assets/{KEY}"))
            .send(&make_service(assets)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_key_never_touches_the_store() -> TestResult {
        let mut assets = MockAssetStore::new();

        assets.expect_path().never();

        let res = TestClient::get("http://example.com/assets/..%2F..%2Fetc%2Fpasswd")
            .send(&make_service(assets)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
