//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;

mod crime_stat_repository;
mod notification_repository;
mod report_repository;
mod user_repository;

pub use crime_stat_repository::{CrimeStatRepository, CrimeStatStore};
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use report_repository::{ReportRepository, ReportStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use crime_stat_repository::MockCrimeStatRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use report_repository::MockReportRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

/// Map a unique-constraint violation to a Conflict, leaving other database
/// errors untouched.
pub(crate) fn insert_error(e: DbErr, entity: &str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
        _ => AppError::from(e),
    }
}
