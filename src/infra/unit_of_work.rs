//! Unit of Work: one access point for every repository plus transactions.
//!
//! Reads and single-row writes go through the shared repositories. Work that
//! must commit or roll back together (stock moves and the order that caused
//! them) runs inside [`UnitOfWork::transaction`] using the transaction-bound
//! repositories on [`TransactionContext`].
//!
//! The transaction-bound repositories are traits, so a test Unit of Work can
//! hand mocked ones to the very same closure the services pass in.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, NotSet, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::{category, order, product};
use super::repositories::{
    CategoryRepository, CategoryStore, ClientRepository, ClientStore, EmployeeRepository,
    EmployeeStore, OrderRepository, OrderStore, ProductRepository, ProductStore,
    SupplierRepository, SupplierStore, UserRepository, UserStore,
};
use crate::domain::{Order, OrderId, Product};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method; tests
/// implement it by hand around mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn clients(&self) -> Arc<dyn ClientRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    fn suppliers(&self) -> Arc<dyn SupplierRepository>;

    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    /// Run `f` inside a ReadCommitted transaction. Commits on `Ok`, rolls
    /// back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Product stock as seen from inside a transaction
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TxProductRepository: Send + Sync {
    /// Load and lock the given products, keyed by id. Ids that do not exist
    /// are simply absent from the map.
    async fn find_for_update(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Product>>;

    /// Write back the stock level of every product in `products`.
    async fn save_stock(&self, products: &HashMap<Uuid, Product>) -> AppResult<()>;
}

/// Order writes that commit together with the stock they moved
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TxOrderRepository: Send + Sync {
    /// Load and lock an order.
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>>;

    async fn insert(&self, order: &Order) -> AppResult<Order>;

    async fn update(&self, order: &Order) -> AppResult<Order>;

    async fn delete(&self, id: &OrderId) -> AppResult<()>;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    products: &'a dyn TxProductRepository,
    orders: &'a dyn TxOrderRepository,
}

impl<'a> TransactionContext<'a> {
    pub fn new(products: &'a dyn TxProductRepository, orders: &'a dyn TxOrderRepository) -> Self {
        Self { products, orders }
    }

    pub fn products(&self) -> &'a dyn TxProductRepository {
        self.products
    }

    pub fn orders(&self) -> &'a dyn TxOrderRepository {
        self.orders
    }
}

/// SeaORM-backed Unit of Work
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    category_repo: Arc<CategoryStore>,
    product_repo: Arc<ProductStore>,
    client_repo: Arc<ClientStore>,
    order_repo: Arc<OrderStore>,
    supplier_repo: Arc<SupplierStore>,
    employee_repo: Arc<EmployeeStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            client_repo: Arc::new(ClientStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            supplier_repo: Arc::new(SupplierStore::new(db.clone())),
            employee_repo: Arc::new(EmployeeStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.client_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierRepository> {
        self.supplier_repo.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let products = TxProductStore { txn: &txn };
        let orders = TxOrderStore { txn: &txn };
        let result = f(TransactionContext::new(&products, &orders)).await;

        match result {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Product rows locked (`FOR UPDATE`) for the rest of the transaction.
pub struct TxProductStore<'a> {
    txn: &'a DatabaseTransaction,
}

#[async_trait]
impl TxProductRepository for TxProductStore<'_> {
    async fn find_for_update(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = product::Entity::find()
            .filter(product::Column::Id.is_in(ids.iter().copied()))
            .lock_exclusive()
            .all(self.txn)
            .await?;

        let category_ids: Vec<Uuid> = rows.iter().map(|p| p.category_id).collect();
        let categories: HashMap<Uuid, category::Model> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(self.txn)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        rows.into_iter()
            .map(|row| {
                let category = categories.get(&row.category_id).cloned();
                super::repositories::join_category((row, category)).map(|p| (p.id, p))
            })
            .collect()
    }

    async fn save_stock(&self, products: &HashMap<Uuid, Product>) -> AppResult<()> {
        let now = chrono::Utc::now();
        for product in products.values() {
            product::ActiveModel {
                id: Set(product.id),
                stock: Set(product.stock),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(self.txn)
            .await?;
        }
        Ok(())
    }
}

pub struct TxOrderStore<'a> {
    txn: &'a DatabaseTransaction,
}

#[async_trait]
impl TxOrderRepository for TxOrderStore<'_> {
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>> {
        order::Entity::find_by_id(id.to_string())
            .lock_exclusive()
            .one(self.txn)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn insert(&self, order: &Order) -> AppResult<Order> {
        let model = order::ActiveModel::try_from(order)?
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_write(e, format!("Order {}", order.id)))?;
        Order::try_from(model)
    }

    async fn update(&self, order: &Order) -> AppResult<Order> {
        let mut active = order::ActiveModel::try_from(order)?;
        active.created_at = NotSet;
        let model = active.update(self.txn).await?;
        Order::try_from(model)
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        let result = order::Entity::delete_by_id(id.to_string())
            .exec(self.txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Order"));
        }
        Ok(())
    }
}

/// Run a block inside a transaction:
/// `with_transaction!(uow, |ctx| { ... Ok(value) })`
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
