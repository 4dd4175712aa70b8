//! User service - API account management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{is_valid_role, USER_SORT_COLUMNS};
use crate::domain::User;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
///
/// Lookups exclude soft-deleted accounts unless stated otherwise.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn list_users(
        &self,
        params: PaginationParams,
        include_deleted: bool,
    ) -> AppResult<Paginated<User>>;

    /// Change name and/or role. Role must be `user` or `admin`.
    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<String>,
    ) -> AppResult<User>;

    /// Soft delete (sets deleted_at)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    async fn restore_user(&self, id: Uuid) -> AppResult<User>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("User")
    }

    async fn list_users(
        &self,
        params: PaginationParams,
        include_deleted: bool,
    ) -> AppResult<Paginated<User>> {
        let params = params.sortable_by(USER_SORT_COLUMNS);
        let (users, total) = self.uow.users().list(&params, include_deleted).await?;
        Ok(Paginated::new(users, &params, total))
    }

    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<String>,
    ) -> AppResult<User> {
        if let Some(ref role) = role {
            if !is_valid_role(role) {
                return Err(AppError::validation(
                    "Invalid role. Must be 'user' or 'admin'",
                ));
            }
        }

        self.uow.users().update(id, name, role).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = %id, "User soft-deleted");
        Ok(())
    }

    async fn restore_user(&self, id: Uuid) -> AppResult<User> {
        let existing = self
            .uow
            .users()
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_not_found("User")?;

        if !existing.is_deleted() {
            return Err(AppError::bad_request("User is not deleted"));
        }

        self.uow.users().restore(id).await
    }
}
