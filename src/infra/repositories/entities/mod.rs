//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod client;
pub mod employee;
pub mod order;
pub mod product;
pub mod supplier;
pub mod user;
