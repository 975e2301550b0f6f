//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Every mutating or role-gated operation takes the
//! acting principal and routes the decision through domain::policy.

mod auth_service;
pub mod container;
mod notification_service;
mod report_service;
mod stats_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use notification_service::{NotificationService, Notifier};
pub use report_service::{ReportManager, ReportService};
pub use stats_service::{
    CategoryCount, DayCount, StatsManager, StatsService, StatusCount, SummaryResponse,
};
pub use user_service::{UserManager, UserService};
