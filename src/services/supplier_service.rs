//! Supplier service.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SUPPLIER_SORT_COLUMNS;
use crate::domain::{
    CategoryRef, CreateSupplier, NotificationEntity, NotificationType, Supplier, SupplierFilter,
    UpdateSupplier,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Notifier, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait SupplierService: Send + Sync {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Supplier>>;

    async fn get(&self, id: Uuid) -> AppResult<Supplier>;

    async fn create(&self, request: CreateSupplier) -> AppResult<Supplier>;

    /// Partial update. A missing category keeps the current one.
    async fn update(&self, id: Uuid, request: UpdateSupplier) -> AppResult<Supplier>;

    /// Hard delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SupplierManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<Notifier>,
}

impl<U: UnitOfWork> SupplierManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<Notifier>) -> Self {
        Self { uow, notifier }
    }

    /// Unknown or deleted category names are a bad request.
    async fn category_ref(&self, name: &str) -> AppResult<CategoryRef> {
        match self.uow.categories().find_by_name(name.trim()).await? {
            Some(category) if !category.is_deleted => Ok(CategoryRef {
                id: category.id,
                name: category.name,
            }),
            _ => Err(AppError::bad_request(format!("Category not found: {}", name))),
        }
    }

    fn notify(&self, kind: NotificationType, supplier: &Supplier) {
        self.notifier
            .publish(NotificationEntity::Suppliers, kind, supplier);
    }
}

#[async_trait]
impl<U: UnitOfWork> SupplierService for SupplierManager<U> {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Supplier>> {
        let params = params.sortable_by(SUPPLIER_SORT_COLUMNS);
        let (suppliers, total) = self.uow.suppliers().list(&filter, &params).await?;
        Ok(Paginated::new(suppliers, &params, total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        self.uow
            .suppliers()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Supplier")
    }

    async fn create(&self, request: CreateSupplier) -> AppResult<Supplier> {
        let category = self.category_ref(&request.category).await?;

        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: request.name,
            contact: request.contact,
            address: request.address,
            date_of_hire: Utc::now(),
            category,
            is_deleted: request.is_deleted.unwrap_or(false),
        };

        let saved = self.uow.suppliers().insert(&supplier).await?;
        tracing::info!(supplier_id = %saved.id, name = %saved.name, "Supplier created");

        self.notify(NotificationType::Create, &saved);
        Ok(saved)
    }

    async fn update(&self, id: Uuid, mut request: UpdateSupplier) -> AppResult<Supplier> {
        let mut supplier = self.get(id).await?;

        if let Some(name) = request.category.take() {
            supplier.category = self.category_ref(&name).await?;
        }
        request.apply(&mut supplier);

        let updated = self.uow.suppliers().update(&supplier).await?;
        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let supplier = self.get(id).await?;

        self.uow.suppliers().delete(id).await?;
        tracing::info!(supplier_id = %id, "Supplier deleted");

        self.notify(NotificationType::Delete, &supplier);
        Ok(())
    }
}
