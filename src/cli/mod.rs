//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Insert the sample orders

pub mod args;

pub use args::{Cli, Commands};
