//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the pure rules that act on them. Nothing in
//! here touches the database, Redis or HTTP.

pub mod category;
pub mod client;
pub mod employee;
pub mod notification;
pub mod order;
pub mod password;
pub mod product;
pub mod supplier;
pub mod user;
pub mod validators;

pub use category::{Category, CategoryFilter, CategoryRequest};
pub use client::{Client, ClientFilter, CreateClient, UpdateClient};
pub use employee::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployee};
pub use notification::{Notification, NotificationEntity, NotificationType};
pub use order::{
    check_order, reserve_stock, return_stock, CreateOrder, Order, OrderError, OrderId, OrderLine,
    OrderLineRequest, UpdateOrder,
};
pub use password::Password;
pub use product::{CategoryRef, CreateProduct, Product, ProductFilter, UpdateProduct};
pub use supplier::{CreateSupplier, Supplier, SupplierFilter, UpdateSupplier};
pub use user::{NewUser, UpdateUser, User, UserResponse, UserRole};
