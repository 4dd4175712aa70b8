//! Product service - catalog products and their images.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{DEFAULT_PRODUCT_IMAGE, PRODUCT_SORT_COLUMNS};
use crate::domain::{
    CategoryRef, CreateProduct, NotificationEntity, NotificationType, Product, ProductFilter,
    UpdateProduct,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FileStorage, Notifier, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list(
        &self,
        filter: ProductFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Product>>;

    async fn get(&self, id: Uuid) -> AppResult<Product>;

    async fn create(&self, request: CreateProduct) -> AppResult<Product>;

    /// Partial update. A missing category keeps the current one.
    async fn update(&self, id: Uuid, request: UpdateProduct) -> AppResult<Product>;

    /// Store `bytes` as the product picture, replacing any uploaded one.
    async fn update_image(&self, id: Uuid, file_name: &str, bytes: &[u8]) -> AppResult<Product>;

    /// Hard delete, removing an uploaded picture too
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: Arc<FileStorage>,
    notifier: Arc<Notifier>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>, storage: Arc<FileStorage>, notifier: Arc<Notifier>) -> Self {
        Self {
            uow,
            storage,
            notifier,
        }
    }

    /// Resolve a category by name. Unknown or deleted names are a bad request.
    async fn category_ref(&self, name: &str) -> AppResult<CategoryRef> {
        match self.uow.categories().find_by_name(name.trim()).await? {
            Some(category) if !category.is_deleted => Ok(CategoryRef {
                id: category.id,
                name: category.name,
            }),
            _ => Err(AppError::bad_request(format!("Category not found: {}", name))),
        }
    }

    /// Remove an uploaded picture. Placeholder and external URLs are left alone.
    async fn discard_image(&self, product: &Product) {
        if product.has_default_image() || !self.storage.is_stored(&product.img) {
            return;
        }
        if let Err(e) = self.storage.delete(&product.img).await {
            tracing::warn!(product_id = %product.id, "Failed to delete product image: {}", e);
        }
    }

    /// Remove a file stored for a write that did not go through.
    async fn discard_upload(&self, stored: &str) {
        if let Err(e) = self.storage.delete(stored).await {
            tracing::warn!(file = %stored, "Failed to delete orphaned upload: {}", e);
        }
    }

    fn notify(&self, kind: NotificationType, product: &Product) {
        self.notifier
            .publish(NotificationEntity::Products, kind, product);
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn list(
        &self,
        filter: ProductFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Product>> {
        let params = params.sortable_by(PRODUCT_SORT_COLUMNS);
        let (products, total) = self.uow.products().list(&filter, &params).await?;
        Ok(Paginated::new(products, &params, total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn create(&self, request: CreateProduct) -> AppResult<Product> {
        let category = self.category_ref(&request.category).await?;
        let now = Utc::now();

        let product = Product {
            id: Uuid::new_v4(),
            name: request.name,
            weight: request.weight,
            price: request.price,
            img: request
                .img
                .filter(|img| !img.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            stock: request.stock,
            description: request.description,
            category,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let saved = self.uow.products().insert(&product).await?;
        tracing::info!(product_id = %saved.id, name = %saved.name, "Product created");

        self.notify(NotificationType::Create, &saved);
        Ok(saved)
    }

    async fn update(&self, id: Uuid, mut request: UpdateProduct) -> AppResult<Product> {
        let mut product = self.get(id).await?;

        if let Some(name) = request.category.take() {
            product.category = self.category_ref(&name).await?;
        }
        request.apply(&mut product);

        let updated = self.uow.products().update(&product).await?;
        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn update_image(&self, id: Uuid, file_name: &str, bytes: &[u8]) -> AppResult<Product> {
        let mut product = self.get(id).await?;
        let previous = product.clone();

        let stored = self.storage.store(file_name, bytes).await?;
        product.img = self.storage.url(&stored);
        product.updated_at = Utc::now();

        let updated = match self.uow.products().update(&product).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_upload(&stored).await;
                return Err(e);
            }
        };
        self.discard_image(&previous).await;
        tracing::info!(product_id = %id, file = %stored, "Product image replaced");

        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let product = self.get(id).await?;

        self.uow.products().delete(id).await?;
        self.discard_image(&product).await;
        tracing::info!(product_id = %id, "Product deleted");

        self.notify(NotificationType::Delete, &product);
        Ok(())
    }
}
