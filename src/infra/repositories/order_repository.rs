//! Order repository over the `orders` store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use super::entities::order::{self, ActiveModel, Entity as OrderEntity};
use super::query::sort_order;
use crate::domain::{Order, OrderId};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access plus plain inserts. Writes that move stock go through
/// [`TransactionContext`](crate::infra::TransactionContext).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Order>, u64)>;

    async fn list_by_user(
        &self,
        id_user: i64,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Order>, u64)>;

    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>>;

    async fn exists_by_user(&self, id_user: i64) -> AppResult<bool>;

    /// Insert as-is. A taken id is reported as `Conflict`.
    async fn insert(&self, order: &Order) -> AppResult<Order>;
}

pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn page(
        &self,
        query: Select<OrderEntity>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Order>, u64)> {
        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        let orders = models
            .into_iter()
            .map(Order::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((orders, total))
    }
}

fn sort_column(sort_by: &str) -> order::Column {
    match sort_by {
        "id_user" => order::Column::IdUser,
        "total" => order::Column::Total,
        "total_items" => order::Column::TotalItems,
        "created_at" => order::Column::CreatedAt,
        "updated_at" => order::Column::UpdatedAt,
        _ => order::Column::Id,
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Order>, u64)> {
        self.page(OrderEntity::find(), params).await
    }

    async fn list_by_user(
        &self,
        id_user: i64,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Order>, u64)> {
        let query = OrderEntity::find().filter(order::Column::IdUser.eq(id_user));
        self.page(query, params).await
    }

    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>> {
        OrderEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn exists_by_user(&self, id_user: i64) -> AppResult<bool> {
        let count = OrderEntity::find()
            .filter(order::Column::IdUser.eq(id_user))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, order: &Order) -> AppResult<Order> {
        let model = ActiveModel::try_from(order)?
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, format!("Order {}", order.id)))?;

        Order::try_from(model)
    }
}
