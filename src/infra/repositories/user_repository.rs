//! User repository with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::query::sort_order;
use crate::config::ROLE_USER;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Query methods exclude soft-deleted records unless their name says otherwise.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// True if any account, deleted or not, already uses the username or email
    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> AppResult<bool>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn update(&self, id: Uuid, name: Option<String>, role: Option<String>) -> AppResult<User>;

    /// Soft delete (sets deleted_at)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn restore(&self, id: Uuid) -> AppResult<User>;

    async fn list(
        &self,
        params: &PaginationParams,
        include_deleted: bool,
    ) -> AppResult<(Vec<User>, u64)>;
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_not_found("User")
    }
}

fn sort_column(sort_by: &str) -> user::Column {
    match sort_by {
        "username" => user::Column::Username,
        "email" => user::Column::Email,
        "name" => user::Column::Name,
        "created_at" => user::Column::CreatedAt,
        _ => user::Column::Id,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "User"))?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, name: Option<String>, role: Option<String>) -> AppResult<User> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(role) = role {
            active.role = Set(role);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        let now = chrono::Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_not_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::validation("User is not deleted or does not exist"))?;

        let mut active: ActiveModel = user.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn list(
        &self,
        params: &PaginationParams,
        include_deleted: bool,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut query = UserEntity::find();
        if !include_deleted {
            query = query.filter(user::Column::DeletedAt.is_null());
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
