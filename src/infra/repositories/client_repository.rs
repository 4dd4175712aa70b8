//! Client repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::client::{self, ActiveModel, Entity as ClientEntity};
use super::query::{contains_ci, sort_order};
use crate::domain::{Client, ClientFilter, CreateClient};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list(
        &self,
        filter: &ClientFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Client>, u64)>;

    /// Includes soft-deleted clients
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Client>>;

    async fn create(&self, client: CreateClient) -> AppResult<Client>;

    async fn update(&self, client: &Client) -> AppResult<Client>;

    /// Hard delete
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort_by: &str) -> client::Column {
    match sort_by {
        "username" => client::Column::Username,
        "name" => client::Column::Name,
        "balance" => client::Column::Balance,
        "created_at" => client::Column::CreatedAt,
        _ => client::Column::Id,
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn list(
        &self,
        filter: &ClientFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Client>, u64)> {
        let mut query = ClientEntity::find();
        if let Some(username) = filter.username.as_deref() {
            query = query.filter(contains_ci(client::Column::Username, username));
        }
        if let Some(is_deleted) = filter.is_deleted {
            query = query.filter(client::Column::IsDeleted.eq(is_deleted));
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        Ok((models.into_iter().map(Client::from).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Client>> {
        let result = ClientEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Client::from))
    }

    async fn create(&self, client: CreateClient) -> AppResult<Client> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: NotSet,
            username: Set(client.username),
            name: Set(client.name),
            balance: Set(client.balance),
            email: Set(client.email),
            address: Set(client.address),
            phone: Set(client.phone),
            birthdate: Set(client.birthdate),
            image: Set(client.image),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "Client"))?;

        Ok(Client::from(model))
    }

    async fn update(&self, client: &Client) -> AppResult<Client> {
        let model = ActiveModel {
            id: Set(client.id),
            username: Set(client.username.clone()),
            name: Set(client.name.clone()),
            balance: Set(client.balance),
            email: Set(client.email.clone()),
            address: Set(client.address.clone()),
            phone: Set(client.phone.clone()),
            birthdate: Set(client.birthdate),
            image: Set(client.image.clone()),
            is_deleted: Set(client.is_deleted),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now()),
        }
        .update(&self.db)
        .await?;

        Ok(Client::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = ClientEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Client"));
        }
        Ok(())
    }
}
