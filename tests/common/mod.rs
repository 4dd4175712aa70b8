//! Shared fixtures for service tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use tienda_api::domain::{
    Category, CategoryRef, Client, Employee, Product, Supplier, User, UserRole,
};
use tienda_api::errors::AppResult;
use tienda_api::infra::repositories::{
    MockCategoryRepository, MockClientRepository, MockEmployeeRepository, MockOrderRepository,
    MockProductRepository, MockSupplierRepository, MockUserRepository,
};
use tienda_api::infra::{
    CategoryRepository, ClientRepository, EmployeeRepository, MockTxOrderRepository,
    MockTxProductRepository, OrderRepository, ProductRepository, SupplierRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

/// UnitOfWork over mocked repositories. Repositories that a test does not
/// set up get a fresh mock, so any call to them fails the test.
///
/// `transaction` runs the closure against the `locked_*` mocks, the
/// transaction-bound repositories.
#[derive(Default)]
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    clients: Arc<MockClientRepository>,
    orders: Arc<MockOrderRepository>,
    suppliers: Arc<MockSupplierRepository>,
    employees: Arc<MockEmployeeRepository>,
    locked_products: Arc<MockTxProductRepository>,
    locked_orders: Arc<MockTxOrderRepository>,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_categories(mut self, repo: MockCategoryRepository) -> Self {
        self.categories = Arc::new(repo);
        self
    }

    pub fn with_products(mut self, repo: MockProductRepository) -> Self {
        self.products = Arc::new(repo);
        self
    }

    pub fn with_clients(mut self, repo: MockClientRepository) -> Self {
        self.clients = Arc::new(repo);
        self
    }

    pub fn with_orders(mut self, repo: MockOrderRepository) -> Self {
        self.orders = Arc::new(repo);
        self
    }

    pub fn with_suppliers(mut self, repo: MockSupplierRepository) -> Self {
        self.suppliers = Arc::new(repo);
        self
    }

    pub fn with_employees(mut self, repo: MockEmployeeRepository) -> Self {
        self.employees = Arc::new(repo);
        self
    }

    pub fn with_locked_products(mut self, repo: MockTxProductRepository) -> Self {
        self.locked_products = Arc::new(repo);
        self
    }

    pub fn with_locked_orders(mut self, repo: MockTxOrderRepository) -> Self {
        self.locked_orders = Arc::new(repo);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.clients.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierRepository> {
        self.suppliers.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        f(TransactionContext::new(
            &*self.locked_products,
            &*self.locked_orders,
        ))
        .await
    }
}

pub fn user(id: Uuid) -> User {
    User {
        id,
        username: "tester".to_string(),
        email: "tester@example.com".to_string(),
        password_hash: "hashed".to_string(),
        name: "Test User".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

pub fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        is_deleted: false,
    }
}

pub fn product(id: Uuid, img: &str) -> Product {
    Product {
        id,
        name: "Laptop".to_string(),
        weight: 2.1,
        price: Decimal::new(99999, 2),
        img: img.to_string(),
        stock: 10,
        description: "A laptop".to_string(),
        category: CategoryRef {
            id: Uuid::new_v4(),
            name: "Laptops".to_string(),
        },
        created_at: Utc::now(),
        updated_at: Utc::now(),
        is_deleted: false,
    }
}

pub fn client(id: i64) -> Client {
    Client {
        id,
        username: "user1".to_string(),
        name: "John".to_string(),
        balance: Decimal::new(10000, 2),
        email: "john@clownsinformatics.com".to_string(),
        address: "1234 Main St".to_string(),
        phone: "673 456 893".to_string(),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        image: None,
        is_deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn supplier(id: Uuid) -> Supplier {
    Supplier {
        id,
        name: "Acme".to_string(),
        contact: 612345678,
        address: "Calle Mayor 1".to_string(),
        date_of_hire: Utc::now(),
        category: CategoryRef {
            id: Uuid::new_v4(),
            name: "Laptops".to_string(),
        },
        is_deleted: false,
    }
}

pub fn employee(id: i32) -> Employee {
    Employee {
        id,
        name: "Ana".to_string(),
        salary: Decimal::new(180000, 2),
        position: "Cashier".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
