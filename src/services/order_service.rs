//! Order service - placing, changing and cancelling orders.
//!
//! Every write that moves stock runs in one transaction together with the
//! order row, with the affected product rows locked until commit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ORDER_SORT_COLUMNS;
use crate::domain::{
    check_order, reserve_stock, return_stock, Client, CreateOrder, Order, OrderId, OrderLine,
    Product, UpdateOrder,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};
use crate::with_transaction;

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn find_all(&self, params: PaginationParams) -> AppResult<Paginated<Order>>;

    async fn find_by_id(&self, id: &OrderId) -> AppResult<Order>;

    async fn find_by_user(&self, id_user: i64, params: PaginationParams)
        -> AppResult<Paginated<Order>>;

    async fn create(&self, request: CreateOrder) -> AppResult<Order>;

    async fn update(&self, id: &OrderId, request: UpdateOrder) -> AppResult<Order>;

    /// Delete the order and put its stock back
    async fn delete(&self, id: &OrderId) -> AppResult<()>;
}

pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Current client record, used as the order snapshot
    async fn client_snapshot(&self, id_user: i64) -> AppResult<Client> {
        self.uow
            .clients()
            .find_by_id(id_user)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_not_found("Client")
    }

    async fn ensure_exists(&self, id: &OrderId) -> AppResult<Order> {
        self.uow
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Order")
    }
}

fn product_ids<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = lines.into_iter().map(|l| l.id_product).collect();
    ids.sort();
    ids.dedup();
    ids
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn find_all(&self, params: PaginationParams) -> AppResult<Paginated<Order>> {
        let params = params.sortable_by(ORDER_SORT_COLUMNS);
        let (orders, total) = self.uow.orders().list(&params).await?;
        Ok(Paginated::new(orders, &params, total))
    }

    async fn find_by_id(&self, id: &OrderId) -> AppResult<Order> {
        self.ensure_exists(id).await
    }

    async fn find_by_user(
        &self,
        id_user: i64,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>> {
        let params = params.sortable_by(ORDER_SORT_COLUMNS);
        let (orders, total) = self.uow.orders().list_by_user(id_user, &params).await?;
        Ok(Paginated::new(orders, &params, total))
    }

    async fn create(&self, request: CreateOrder) -> AppResult<Order> {
        let client = self.client_snapshot(request.id_user).await?;
        let lines = request
            .order_lines
            .into_iter()
            .map(OrderLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut order = Order::new(client, lines)?;

        let saved = with_transaction!(self.uow, |ctx| {
            let products = ctx.products();
            let mut catalog: HashMap<Uuid, Product> = products
                .find_for_update(&product_ids(&order.order_lines))
                .await?;

            check_order(&order.order_lines, &catalog)?;
            reserve_stock(&mut order, &mut catalog)?;
            products.save_stock(&catalog).await?;

            ctx.orders().insert(&order).await
        })?;

        tracing::info!(
            order_id = %saved.id,
            id_user = saved.id_user,
            total = %saved.total,
            "Order created"
        );
        Ok(saved)
    }

    async fn update(&self, id: &OrderId, request: UpdateOrder) -> AppResult<Order> {
        let current = self.ensure_exists(id).await?;
        let client = self
            .client_snapshot(request.id_user.unwrap_or(current.id_user))
            .await?;
        let new_lines = request
            .order_lines
            .map(|lines| {
                lines
                    .into_iter()
                    .map(OrderLine::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let id = id.clone();

        let updated = with_transaction!(self.uow, |ctx| {
            let mut order = ctx.orders().find_by_id(&id).await?.ok_or_not_found("Order")?;
            let lines = new_lines.unwrap_or_else(|| order.order_lines.clone());

            let products = ctx.products();
            let mut catalog = products
                .find_for_update(&product_ids(order.order_lines.iter().chain(lines.iter())))
                .await?;

            return_stock(&order.order_lines, &mut catalog);
            check_order(&lines, &catalog)?;

            order.order_lines = lines;
            order.id_user = client.id;
            order.client = client;
            reserve_stock(&mut order, &mut catalog)?;
            order.touch();

            products.save_stock(&catalog).await?;
            ctx.orders().update(&order).await
        })?;

        tracing::info!(order_id = %updated.id, total = %updated.total, "Order updated");
        Ok(updated)
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        self.ensure_exists(id).await?;
        let order_id = id.clone();

        with_transaction!(self.uow, |ctx| {
            let id = order_id;
            let order = ctx.orders().find_by_id(&id).await?.ok_or_not_found("Order")?;

            let products = ctx.products();
            let mut catalog = products
                .find_for_update(&product_ids(&order.order_lines))
                .await?;
            return_stock(&order.order_lines, &mut catalog);
            products.save_stock(&catalog).await?;

            ctx.orders().delete(&id).await
        })?;

        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }
}
