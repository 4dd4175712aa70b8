//! Category repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use super::query::{contains_ci, equals_ci, sort_order};
use crate::domain::{Category, CategoryFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(
        &self,
        filter: &CategoryFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Category>, u64)>;

    /// Includes soft-deleted categories
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Case-insensitive exact match, soft-deleted included
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    async fn create(&self, name: String) -> AppResult<Category>;

    /// Persist name and deletion flag; bumps `updated_at`
    async fn update(&self, category: &Category) -> AppResult<Category>;
}

pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort_by: &str) -> category::Column {
    match sort_by {
        "name" => category::Column::Name,
        "created_at" => category::Column::CreatedAt,
        "updated_at" => category::Column::UpdatedAt,
        _ => category::Column::Id,
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn list(
        &self,
        filter: &CategoryFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Category>, u64)> {
        let mut query = CategoryEntity::find();
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(category::Column::Name, name));
        }
        if let Some(is_deleted) = filter.is_deleted {
            query = query.filter(category::Column::IsDeleted.eq(is_deleted));
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        Ok((models.into_iter().map(Category::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find()
            .filter(equals_ci(category::Column::Name, name))
            .one(&self.db)
            .await?;
        Ok(result.map(Category::from))
    }

    async fn create(&self, name: String) -> AppResult<Category> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "Category"))?;

        Ok(Category::from(model))
    }

    async fn update(&self, category: &Category) -> AppResult<Category> {
        let existing = CategoryEntity::find_by_id(category.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Category")?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(category.name.clone());
        active.is_deleted = Set(category.is_deleted);
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Category"))?;
        Ok(Category::from(model))
    }
}
