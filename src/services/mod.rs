//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and infrastructure. Each one is a trait
//! plus an implementation generic over the Unit of Work, so tests can swap
//! in mocked repositories.

mod auth_service;
mod category_service;
mod client_service;
pub mod container;
mod employee_service;
mod order_service;
mod product_service;
mod supplier_service;
mod user_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, SignUp, TokenResponse};
pub use category_service::{CategoryManager, CategoryService};
pub use client_service::{ClientManager, ClientService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};
pub use supplier_service::{SupplierManager, SupplierService};
pub use user_service::{UserManager, UserService};
