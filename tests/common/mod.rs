//! Shared test fixtures: a fake unit of work over mockall repositories and
//! entity factories.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crimewatch::domain::crime_stat::CrimeStat;
use crimewatch::domain::notification::{Notification, NotificationType};
use crimewatch::domain::policy::Actor;
use crimewatch::domain::report::{Category, Report, ReportStatus};
use crimewatch::domain::user::{AccountStatus, Role, User};
use crimewatch::infra::repositories::{
    CrimeStatRepository, MockCrimeStatRepository, MockNotificationRepository,
    MockReportRepository, MockUserRepository, NotificationRepository, ReportRepository,
    UserRepository,
};
use crimewatch::infra::UnitOfWork;

/// Unit of work handing out pre-programmed mock repositories.
///
/// Mocks default to empty expectation sets, so a test only programs the
/// repositories its code path is allowed to touch; an unexpected call
/// panics.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    reports: Arc<MockReportRepository>,
    notifications: Arc<MockNotificationRepository>,
    crime_stats: Arc<MockCrimeStatRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            reports: Arc::new(MockReportRepository::new()),
            notifications: Arc::new(MockNotificationRepository::new()),
            crime_stats: Arc::new(MockCrimeStatRepository::new()),
        }
    }
}

#[allow(dead_code)]
impl TestUnitOfWork {
    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_reports(mut self, repo: MockReportRepository) -> Self {
        self.reports = Arc::new(repo);
        self
    }

    pub fn with_notifications(mut self, repo: MockNotificationRepository) -> Self {
        self.notifications = Arc::new(repo);
        self
    }

    pub fn with_crime_stats(mut self, repo: MockCrimeStatRepository) -> Self {
        self.crime_stats = Arc::new(repo);
        self
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    fn crime_stats(&self) -> Arc<dyn CrimeStatRepository> {
        self.crime_stats.clone()
    }
}

#[allow(dead_code)]
pub fn actor(role: Role) -> Actor {
    Actor::user(Uuid::new_v4(), role, AccountStatus::Approved)
}

#[allow(dead_code)]
pub fn actor_with_id(id: Uuid, role: Role) -> Actor {
    Actor::user(id, role, AccountStatus::Approved)
}

#[allow(dead_code)]
pub fn test_user(id: Uuid, role: Role, status: AccountStatus) -> User {
    User {
        id,
        email: format!("{}@example.com", id.simple()),
        username: "test".to_string(),
        password_hash: "hashed".to_string(),
        role,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[allow(dead_code)]
pub fn test_report(id: Uuid, user_id: Uuid, status: ReportStatus) -> Report {
    Report {
        id,
        user_id,
        category: Category::Theft,
        description: "stolen bicycle".to_string(),
        latitude: 52.37,
        longitude: 4.89,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[allow(dead_code)]
pub fn test_notification(id: Uuid, recipient_id: Option<Uuid>) -> Notification {
    Notification {
        id,
        recipient_id,
        recipient_role: if recipient_id.is_none() {
            Some(Role::Admin)
        } else {
            None
        },
        message: "test notification".to_string(),
        notification_type: NotificationType::Acknowledgment,
        created_at: Utc::now(),
        sent_at: None,
        is_read: false,
        report_id: None,
    }
}

#[allow(dead_code)]
pub fn test_crime_stat(id: Uuid, total_reports: u32) -> CrimeStat {
    CrimeStat {
        id,
        incident_type: Category::Theft,
        user_role: Role::Citizen,
        status: ReportStatus::Pending,
        total_reports,
        pending: total_reports,
        in_progress: 0,
        resolved: 0,
        rejected: 0,
        start_date: NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date"),
        end_date: None,
        updated_at: Utc::now(),
    }
}
