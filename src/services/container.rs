//! Service Container - Centralized service access.
//!
//! Holds one Arc per service trait so handlers depend on abstractions, not
//! implementations.

use std::sync::Arc;

use super::{AuthService, NotificationService, ReportService, StatsService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get report service
    fn reports(&self) -> Arc<dyn ReportService>;

    /// Get notification service
    fn notifications(&self) -> Arc<dyn NotificationService>;

    /// Get statistics service
    fn stats(&self) -> Arc<dyn StatsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    report_service: Arc<dyn ReportService>,
    notification_service: Arc<dyn NotificationService>,
    stats_service: Arc<dyn StatsService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, Notifier, ReportManager, StatsManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let report_service = Arc::new(ReportManager::new(uow.clone()));
        let notification_service = Arc::new(Notifier::new(uow.clone()));
        let stats_service = Arc::new(StatsManager::new(uow));

        Self {
            auth_service,
            user_service,
            report_service,
            notification_service,
            stats_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn stats(&self) -> Arc<dyn StatsService> {
        self.stats_service.clone()
    }
}
