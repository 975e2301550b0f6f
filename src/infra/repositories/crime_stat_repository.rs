//! CrimeStat repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::crime_stat::{self, ActiveModel, Entity as CrimeStatEntity};
use super::insert_error;
use crate::domain::crime_stat::{CrimeStat, NewCrimeStat};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// CrimeStat repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CrimeStatRepository: Send + Sync {
    /// Insert a new aggregate row.
    ///
    /// The (incident_type, user_role, status) triple is unique; a duplicate
    /// insert surfaces as a Conflict.
    async fn insert(&self, stat: NewCrimeStat) -> AppResult<CrimeStat>;

    /// List all aggregate rows, most recently updated first
    async fn list(&self) -> AppResult<Vec<CrimeStat>>;

    /// Aggregate rows whose reporting period started on or after `since`
    /// (spike scan window)
    async fn started_since(&self, since: NaiveDate) -> AppResult<Vec<CrimeStat>>;
}

/// Concrete implementation of CrimeStatRepository backed by SeaORM
pub struct CrimeStatStore {
    db: DatabaseConnection,
}

impl CrimeStatStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CrimeStatRepository for CrimeStatStore {
    async fn insert(&self, stat: NewCrimeStat) -> AppResult<CrimeStat> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            incident_type: Set(stat.incident_type.as_str().to_string()),
            user_role: Set(stat.user_role.as_str().to_string()),
            status: Set(stat.status.as_str().to_string()),
            total_reports: Set(stat.total_reports as i32),
            pending: Set(stat.pending as i32),
            in_progress: Set(stat.in_progress as i32),
            resolved: Set(stat.resolved as i32),
            rejected: Set(stat.rejected as i32),
            start_date: Set(stat.start_date),
            end_date: Set(stat.end_date),
            updated_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            insert_error(e, "A statistic for this incident type, role and status")
        })?;
        CrimeStat::try_from(model)
    }

    async fn list(&self) -> AppResult<Vec<CrimeStat>> {
        let models = CrimeStatEntity::find()
            .order_by_desc(crime_stat::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(CrimeStat::try_from).collect()
    }

    async fn started_since(&self, since: NaiveDate) -> AppResult<Vec<CrimeStat>> {
        let models = CrimeStatEntity::find()
            .filter(crime_stat::Column::StartDate.gte(since))
            .order_by_desc(crime_stat::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(CrimeStat::try_from).collect()
    }
}
