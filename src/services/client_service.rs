//! Client service - store customers.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::CLIENT_SORT_COLUMNS;
use crate::domain::{
    Client, ClientFilter, CreateClient, NotificationEntity, NotificationType, UpdateClient,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{FileStorage, Notifier, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait ClientService: Send + Sync {
    async fn list(
        &self,
        filter: ClientFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Client>>;

    /// Active clients only
    async fn get(&self, id: i64) -> AppResult<Client>;

    async fn create(&self, request: CreateClient) -> AppResult<Client>;

    async fn update(&self, id: i64, request: UpdateClient) -> AppResult<Client>;

    /// Soft delete while orders still reference the client, hard delete otherwise
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Replace the client picture. `with_url` stores the public URL instead
    /// of the bare file name.
    async fn update_image(
        &self,
        id: i64,
        file_name: &str,
        bytes: &[u8],
        with_url: bool,
    ) -> AppResult<Client>;
}

pub struct ClientManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: Arc<FileStorage>,
    notifier: Arc<Notifier>,
}

impl<U: UnitOfWork> ClientManager<U> {
    pub fn new(uow: Arc<U>, storage: Arc<FileStorage>, notifier: Arc<Notifier>) -> Self {
        Self {
            uow,
            storage,
            notifier,
        }
    }

    async fn discard_image(&self, client: &Client) {
        let Some(image) = client.image.as_deref() else {
            return;
        };
        if !self.storage.is_stored(image) {
            return;
        }
        if let Err(e) = self.storage.delete(image).await {
            tracing::warn!(client_id = client.id, "Failed to delete client image: {}", e);
        }
    }

    /// Remove a file stored for a write that did not go through.
    async fn discard_upload(&self, stored: &str) {
        if let Err(e) = self.storage.delete(stored).await {
            tracing::warn!(file = %stored, "Failed to delete orphaned upload: {}", e);
        }
    }

    fn notify(&self, kind: NotificationType, client: &Client) {
        self.notifier.publish(NotificationEntity::Clients, kind, client);
    }
}

#[async_trait]
impl<U: UnitOfWork> ClientService for ClientManager<U> {
    async fn list(
        &self,
        filter: ClientFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Client>> {
        let params = params.sortable_by(CLIENT_SORT_COLUMNS);
        let (clients, total) = self.uow.clients().list(&filter, &params).await?;
        Ok(Paginated::new(clients, &params, total))
    }

    async fn get(&self, id: i64) -> AppResult<Client> {
        self.uow
            .clients()
            .find_by_id(id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_not_found("Client")
    }

    async fn create(&self, request: CreateClient) -> AppResult<Client> {
        let client = self.uow.clients().create(request).await?;
        tracing::info!(client_id = client.id, username = %client.username, "Client created");

        self.notify(NotificationType::Create, &client);
        Ok(client)
    }

    async fn update(&self, id: i64, request: UpdateClient) -> AppResult<Client> {
        let mut client = self.get(id).await?;
        request.apply(&mut client);

        let updated = self.uow.clients().update(&client).await?;
        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut client = self.get(id).await?;

        if self.uow.orders().exists_by_user(id).await? {
            client.is_deleted = true;
            client.updated_at = Utc::now();
            self.uow.clients().update(&client).await?;
            tracing::info!(client_id = id, "Client has orders, soft-deleted");
        } else {
            self.uow.clients().delete(id).await?;
            self.discard_image(&client).await;
            tracing::info!(client_id = id, "Client deleted");
        }

        self.notify(NotificationType::Delete, &client);
        Ok(())
    }

    async fn update_image(
        &self,
        id: i64,
        file_name: &str,
        bytes: &[u8],
        with_url: bool,
    ) -> AppResult<Client> {
        let mut client = self.get(id).await?;
        let previous = client.clone();

        let stored = self.storage.store(file_name, bytes).await?;
        client.image = Some(if with_url {
            self.storage.url(&stored)
        } else {
            stored.clone()
        });
        client.updated_at = Utc::now();

        let updated = match self.uow.clients().update(&client).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_upload(&stored).await;
                return Err(e);
            }
        };
        self.discard_image(&previous).await;

        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }
}
