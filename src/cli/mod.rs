//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `jobs` - Spike scan worker and one-shot runs

pub mod args;

pub use args::{Cli, Commands};
