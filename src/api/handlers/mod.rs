//! HTTP request handlers.

pub mod auth_handler;
pub mod category_handler;
pub mod client_handler;
pub mod employee_handler;
pub mod health_handler;
pub mod order_handler;
pub mod product_handler;
pub mod storage_handler;
pub mod supplier_handler;
pub mod user_handler;
pub mod ws_handler;

pub use auth_handler::auth_routes;
pub use category_handler::category_routes;
pub use client_handler::client_routes;
pub use employee_handler::employee_routes;
pub use health_handler::health;
pub use order_handler::order_routes;
pub use product_handler::product_routes;
pub use storage_handler::storage_routes;
pub use supplier_handler::supplier_routes;
pub use user_handler::user_routes;
pub use ws_handler::ws_routes;
