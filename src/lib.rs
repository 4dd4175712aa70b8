//! Tienda API - store back office service
//!
//! Catalog (categories, products), clients and orders with stock
//! reservation, served over REST and websockets.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules
//! - **services**: Application use cases
//! - **infra**: Database, cache, file storage, notifications
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! tienda-api serve
//! tienda-api migrate up
//! tienda-api seed --skip-existing
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Order, OrderId, OrderLine, Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
