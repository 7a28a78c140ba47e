//! App Context

use std::{path::PathBuf, sync::Arc};

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    assets::{AssetStore, AssetStoreError, DiskAssetStore},
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),

    #[error("failed to prepare asset storage")]
    Assets(#[source] AssetStoreError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
    pub assets: Arc<dyn AssetStore>,
}

impl AppContext {
    /// Build application context from a database URL and an asset directory.
    ///
    /// Pending migrations are applied before the services are handed out.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or creating the asset
    /// directory fails.
    pub async fn from_database_url(url: &str, assets_dir: PathBuf) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let assets: Arc<dyn AssetStore> = Arc::new(
            DiskAssetStore::open(assets_dir)
                .await
                .map_err(AppInitError::Assets)?,
        );

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone(), Arc::clone(&assets))),
            auth: Arc::new(PgAuthService::new(db)),
            assets,
        })
    }
}
