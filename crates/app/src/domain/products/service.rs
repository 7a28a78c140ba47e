//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::warn;

use crate::{
    assets::{AssetKey, AssetStore},
    database::Db,
    domain::products::{
        data::{ProductChanges, ProductDraft, ValidProduct},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    assets: Arc<dyn AssetStore>,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            assets,
        }
    }

    /// Store the uploaded featured image, if the changes carry one.
    async fn store_image(
        &self,
        changes: &ProductChanges,
    ) -> Result<Option<AssetKey>, ProductsServiceError> {
        match &changes.featured_image {
            Some(upload) => Ok(Some(self.assets.store(upload).await?)),
            None => Ok(None),
        }
    }

    /// Remove an image that is no longer referenced by any product.
    async fn discard_image(&self, key: &AssetKey) {
        if let Err(error) = self.assets.remove(key).await {
            warn!(asset = %key, error = %error, "failed to remove unreferenced asset");
        }
    }

    async fn insert(
        &self,
        product: ProductUuid,
        valid: &ValidProduct,
        featured_image: Option<&AssetKey>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product, valid, featured_image)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn write_update(
        &self,
        mut tx: Transaction<'static, Postgres>,
        product: ProductUuid,
        valid: &ValidProduct,
        featured_image: Option<&AssetKey>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let updated = self
            .repository
            .update_product(&mut tx, product, valid, featured_image)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

impl std::fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        changes: ProductChanges,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let valid = ProductDraft::default()
            .with_changes(&changes)
            .validate(changes.featured_image.as_ref())?;

        let featured_image = self.store_image(&changes).await?;

        match self
            .insert(ProductUuid::new(), &valid, featured_image.as_ref())
            .await
        {
            Ok(created) => Ok(created),
            Err(error) => {
                if let Some(key) = &featured_image {
                    self.discard_image(key).await;
                }

                Err(error)
            }
        }
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        changes: ProductChanges,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        let valid = ProductDraft::from(&current)
            .with_changes(&changes)
            .validate(changes.featured_image.as_ref())?;

        let new_image = self.store_image(&changes).await?;
        let featured_image = new_image.as_ref().or(current.featured_image.as_ref());

        match self.write_update(tx, product, &valid, featured_image).await {
            Ok(updated) => {
                if let (Some(_), Some(replaced)) = (&new_image, &current.featured_image) {
                    self.discard_image(replaced).await;
                }

                Ok(updated)
            }
            Err(error) => {
                if let Some(key) = &new_image {
                    self.discard_image(key).await;
                }

                Err(error)
            }
        }
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self
            .repository
            .delete_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        if let Some(key) = &deleted.featured_image {
            self.discard_image(key).await;
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, oldest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Validates the submitted attributes and persists a new product under a
    /// freshly assigned UUID.
    async fn create_product(
        &self,
        changes: ProductChanges,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies the submitted attributes to an existing product.
    ///
    /// Attributes missing from `changes` keep their current value. Nothing is
    /// written when the result fails validation.
    async fn update_product(
        &self,
        product: ProductUuid,
        changes: ProductChanges,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
