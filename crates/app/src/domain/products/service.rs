//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFilters, ProductPatch, apply_patch},
        errors::ProductsServiceError,
        models::{Product, ProductUuid},
        repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filters: ProductFilters,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut *tx, &filters).await?;

        let items = self
            .repository
            .list_products(&mut *tx, &filters, page)
            .await?;

        tx.commit().await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default(), page))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.get_product(self.db.pool(), product).await?)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError> {
        Ok(self
            .repository
            .get_product_by_slug(self.db.pool(), slug)
            .await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        product.validate()?;

        let created = self
            .repository
            .create_product(self.db.pool(), &product)
            .await?;

        info!(product = %created.uuid, slug = %created.slug, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductsServiceError> {
        patch.validate()?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut *tx, product).await?;

        if patch.is_empty() {
            tx.commit().await?;

            return Ok(current);
        }

        let patched = apply_patch(current, patch)?;

        let updated = self.repository.update_product(&mut *tx, &patched).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let deleted = self
            .repository
            .soft_delete_product(self.db.pool(), product)
            .await?;

        info!(product = %deleted.uuid, "marked product unavailable");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// One page of products matching every filter, newest first.
    async fn list_products(
        &self,
        filters: ProductFilters,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve a single product by slug, whether or not it is available.
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError>;

    /// Validate and store a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Apply a sparse patch. Nothing is written when any field is invalid.
    async fn update_product(
        &self,
        product: ProductUuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductsServiceError>;

    /// Mark a product unavailable. Deleting twice is not an error.
    async fn delete_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;
}
