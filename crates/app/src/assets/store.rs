//! Disk-backed asset store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use tokio::fs;
use tracing::debug;

use crate::assets::{AssetKey, AssetStoreError, ImageFormat};

/// A file received from a client, still sitting in its temporary location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client supplied file name, informational only.
    pub file_name: Option<String>,

    /// Client supplied content type.
    pub content_type: Option<String>,

    /// Temporary path of the received bytes.
    pub path: PathBuf,
}

impl ImageUpload {
    /// Format of the upload as declared by its content type.
    ///
    /// # Errors
    ///
    /// Returns an error when the content type is absent or not an accepted
    /// image format.
    pub fn format(&self) -> Result<ImageFormat, AssetStoreError> {
        let content_type = self
            .content_type
            .as_deref()
            .ok_or(AssetStoreError::MissingContentType)?;

        ImageFormat::from_content_type(content_type)
            .ok_or_else(|| AssetStoreError::UnsupportedContentType(content_type.to_owned()))
    }
}

#[derive(Debug, Clone)]
pub struct DiskAssetStore {
    root: PathBuf,
}

impl DiskAssetStore {
    /// Open (creating when missing) an asset directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, AssetStoreError> {
        let root = root.into();

        fs::create_dir_all(&root).await?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetStore for DiskAssetStore {
    async fn store(&self, upload: &ImageUpload) -> Result<AssetKey, AssetStoreError> {
        let key = AssetKey::generate(upload.format()?);

        fs::copy(&upload.path, self.path(&key)).await?;

        debug!(asset_key = %key, "stored asset");

        Ok(key)
    }

    async fn remove(&self, key: &AssetKey) -> Result<(), AssetStoreError> {
        match fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn path(&self, key: &AssetKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

#[automock]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Copy an upload into the store, returning its new key.
    async fn store(&self, upload: &ImageUpload) -> Result<AssetKey, AssetStoreError>;

    /// Remove a stored asset. Removing a missing asset succeeds.
    async fn remove(&self, key: &AssetKey) -> Result<(), AssetStoreError>;

    /// Location of a stored asset on disk.
    fn path(&self, key: &AssetKey) -> PathBuf;
}
