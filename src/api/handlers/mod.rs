//! HTTP request handlers.

pub mod auth_handler;
pub mod notification_handler;
pub mod report_handler;
pub mod stats_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use notification_handler::notification_routes;
pub use report_handler::report_routes;
pub use stats_handler::stats_routes;
pub use user_handler::user_routes;
