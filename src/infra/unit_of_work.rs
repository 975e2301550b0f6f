//! Unit of Work: centralized repository access.
//!
//! One object owns the database connection and hands out repository
//! handles, so the service container wires everything from a single seam.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CrimeStatRepository, CrimeStatStore, NotificationRepository, NotificationStore,
    ReportRepository, ReportStore, UserRepository, UserStore,
};

/// Repository access trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get report repository
    fn reports(&self) -> Arc<dyn ReportRepository>;

    /// Get notification repository
    fn notifications(&self) -> Arc<dyn NotificationRepository>;

    /// Get crime statistics repository
    fn crime_stats(&self) -> Arc<dyn CrimeStatRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    report_repo: Arc<ReportStore>,
    notification_repo: Arc<NotificationStore>,
    crime_stat_repo: Arc<CrimeStatStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            report_repo: Arc::new(ReportStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db.clone())),
            crime_stat_repo: Arc::new(CrimeStatStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.report_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }

    fn crime_stats(&self) -> Arc<dyn CrimeStatRepository> {
        self.crime_stat_repo.clone()
    }
}
