//! Supplier repository. Every read joins the served category.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::supplier::{self, ActiveModel, Entity as SupplierEntity};
use super::query::{contains_ci, sort_order};
use crate::domain::{Supplier, SupplierFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn list(
        &self,
        filter: &SupplierFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Supplier>>;

    /// Insert using `supplier.category.id` as the foreign key
    async fn insert(&self, supplier: &Supplier) -> AppResult<Supplier>;

    async fn update(&self, supplier: &Supplier) -> AppResult<Supplier>;

    /// Hard delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SupplierStore {
    db: DatabaseConnection,
}

impl SupplierStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort_by: &str) -> supplier::Column {
    match sort_by {
        "name" => supplier::Column::Name,
        "contact" => supplier::Column::Contact,
        "date_of_hire" => supplier::Column::DateOfHire,
        _ => supplier::Column::Id,
    }
}

fn to_active_model(supplier: &Supplier) -> ActiveModel {
    ActiveModel {
        id: Set(supplier.id),
        name: Set(supplier.name.clone()),
        contact: Set(supplier.contact),
        address: Set(supplier.address.clone()),
        date_of_hire: Set(supplier.date_of_hire),
        category_id: Set(supplier.category.id),
        is_deleted: Set(supplier.is_deleted),
    }
}

fn join_category(row: (supplier::Model, Option<category::Model>)) -> AppResult<Supplier> {
    let (supplier, category) = row;
    let category = category.ok_or_else(|| {
        AppError::internal(format!("Supplier {} has no category row", supplier.id))
    })?;
    Ok(supplier.into_domain(category))
}

#[async_trait]
impl SupplierRepository for SupplierStore {
    async fn list(
        &self,
        filter: &SupplierFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)> {
        let mut query = SupplierEntity::find()
            .find_also_related(CategoryEntity)
            .filter(ColumnTrait::eq(&supplier::Column::IsDeleted, filter.is_deleted()));

        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(supplier::Column::Name, name));
        }
        if let Some(contact) = filter.contact {
            query = query.filter(ColumnTrait::eq(&supplier::Column::Contact, contact));
        }
        if let Some(category_name) = filter.category.as_deref() {
            query = query.filter(contains_ci(category::Column::Name, category_name));
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;

        let suppliers = rows
            .into_iter()
            .map(join_category)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((suppliers, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Supplier>> {
        SupplierEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await?
            .map(join_category)
            .transpose()
    }

    async fn insert(&self, supplier: &Supplier) -> AppResult<Supplier> {
        to_active_model(supplier)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Supplier"))?;

        self.find_by_id(supplier.id)
            .await?
            .ok_or_not_found("Supplier")
    }

    async fn update(&self, supplier: &Supplier) -> AppResult<Supplier> {
        let mut active = to_active_model(supplier);
        active.date_of_hire = sea_orm::ActiveValue::NotSet;
        active.update(&self.db).await?;

        self.find_by_id(supplier.id)
            .await?
            .ok_or_not_found("Supplier")
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = SupplierEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Supplier"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_falls_back_to_id() {
        assert_eq!(sort_column("contact"), supplier::Column::Contact);
        assert_eq!(sort_column("bogus"), supplier::Column::Id);
    }
}
