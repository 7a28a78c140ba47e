//! Test context for service-level integration tests.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::TempDir;

use crate::{
    assets::{AssetStore, DiskAssetStore},
    auth::PgAuthService,
    database::Db,
    domain::products::PgProductsService,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub auth: PgAuthService,
    pub assets: Arc<dyn AssetStore>,
    uploads: PathBuf,
    _storage: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let storage = TempDir::new().expect("Failed to create asset directory");

        let uploads = storage.path().join("uploads");

        tokio::fs::create_dir_all(&uploads)
            .await
            .expect("Failed to create uploads directory");

        let assets: Arc<dyn AssetStore> = Arc::new(
            DiskAssetStore::open(storage.path().join("assets"))
                .await
                .expect("Failed to open asset store"),
        );

        Self {
            products: PgProductsService::new(db.clone(), Arc::clone(&assets)),
            auth: PgAuthService::new(db),
            assets,
            db: test_db,
            uploads,
            _storage: storage,
        }
    }

    /// Scratch directory standing in for the web server's upload temp dir.
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }
}
