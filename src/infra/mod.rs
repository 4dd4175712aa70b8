//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and seed data
//! - Repositories and the Unit of Work
//! - Redis cache
//! - Local file storage
//! - Notification channels

pub mod cache;
pub mod db;
pub mod notifier;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use notifier::Notifier;
pub use repositories::{
    CategoryRepository, CategoryStore, ClientRepository, ClientStore, EmployeeRepository,
    EmployeeStore, OrderRepository, OrderStore, ProductRepository, ProductStore,
    SupplierRepository, SupplierStore, UserRepository, UserStore,
};
pub use storage::FileStorage;
pub use unit_of_work::{
    Persistence, TransactionContext, TxOrderRepository, TxOrderStore, TxProductRepository,
    TxProductStore, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCategoryRepository, MockClientRepository, MockEmployeeRepository, MockOrderRepository,
    MockProductRepository, MockSupplierRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::{MockTxOrderRepository, MockTxProductRepository};
