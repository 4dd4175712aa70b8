//! Category service - catalog categories.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CATEGORY_SORT_COLUMNS;
use crate::domain::{Category, CategoryFilter, CategoryRequest, NotificationEntity, NotificationType};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Notifier, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(
        &self,
        filter: CategoryFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Category>>;

    async fn get(&self, id: Uuid) -> AppResult<Category>;

    async fn create(&self, request: CategoryRequest) -> AppResult<Category>;

    async fn update(&self, id: Uuid, request: CategoryRequest) -> AppResult<Category>;

    /// Soft delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<Notifier>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<Notifier>) -> Self {
        Self { uow, notifier }
    }

    /// 409 if a category other than `except` already uses `name`.
    async fn ensure_name_free(&self, name: &str, except: Option<Uuid>) -> AppResult<()> {
        match self.uow.categories().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(AppError::conflict(format!("Category {}", name)))
            }
            _ => Ok(()),
        }
    }

    fn notify(&self, kind: NotificationType, category: &Category) {
        self.notifier
            .publish(NotificationEntity::Categories, kind, category);
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn list(
        &self,
        filter: CategoryFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Category>> {
        let params = params.sortable_by(CATEGORY_SORT_COLUMNS);
        let (categories, total) = self.uow.categories().list(&filter, &params).await?;
        Ok(Paginated::new(categories, &params, total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Category")
    }

    async fn create(&self, request: CategoryRequest) -> AppResult<Category> {
        let name = request.name.trim().to_string();
        self.ensure_name_free(&name, None).await?;

        let category = self.uow.categories().create(name).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "Category created");

        self.notify(NotificationType::Create, &category);
        Ok(category)
    }

    async fn update(&self, id: Uuid, request: CategoryRequest) -> AppResult<Category> {
        let mut category = self.get(id).await?;

        let name = request.name.trim().to_string();
        self.ensure_name_free(&name, Some(id)).await?;

        category.name = name;
        if let Some(is_deleted) = request.is_deleted {
            category.is_deleted = is_deleted;
        }

        let updated = self.uow.categories().update(&category).await?;
        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut category = self.get(id).await?;
        category.is_deleted = true;

        let deleted = self.uow.categories().update(&category).await?;
        tracing::info!(category_id = %id, "Category soft-deleted");

        self.notify(NotificationType::Delete, &deleted);
        Ok(())
    }
}
