//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, mockable in tests, with a SeaORM-backed store.

mod category_repository;
mod client_repository;
mod employee_repository;
pub(crate) mod entities;
mod order_repository;
mod product_repository;
mod query;
mod supplier_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use client_repository::{ClientRepository, ClientStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use supplier_repository::{SupplierRepository, SupplierStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use product_repository::join_category;

#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use supplier_repository::MockSupplierRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
