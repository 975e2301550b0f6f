//! CrimeWatch - Role-based crime reporting API
//!
//! Citizens submit incident reports; law enforcement and admin users triage
//! them; statistics and notifications are derived from the report stream.
//! All authorization decisions flow through the `domain::policy` module.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the authorization policy
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Spike detection scan
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Run the spike scan once
//! cargo run -- jobs scan
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Role, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
