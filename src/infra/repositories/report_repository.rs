//! Report repository implementation.
//!
//! Besides CRUD, this repository exposes the grouped counts the statistics
//! rollups are built from. Grouping keys come back as raw column strings so
//! the service layer can apply display coercions (empty category labels)
//! without the database caring.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::report::{self, ActiveModel, Entity as ReportEntity};
use crate::domain::report::{Category, Report, ReportStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Report repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Create a new report in the given initial status
    async fn create(
        &self,
        user_id: Uuid,
        category: Category,
        description: String,
        latitude: f64,
        longitude: f64,
        status: ReportStatus,
    ) -> AppResult<Report>;

    /// Find report by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Report>>;

    /// List all reports, newest first
    async fn list_all(&self) -> AppResult<Vec<Report>>;

    /// List reports submitted by a user, newest first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Report>>;

    /// Set a report's status
    async fn update_status(&self, id: Uuid, status: ReportStatus) -> AppResult<Report>;

    /// Hard-delete a report
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Total number of reports, optionally scoped to one submitter
    async fn count(&self, user_id: Option<Uuid>) -> AppResult<u64>;

    /// Report counts grouped by raw category value, optionally scoped to
    /// one submitter
    async fn count_by_category(&self, user_id: Option<Uuid>) -> AppResult<Vec<(String, u64)>>;

    /// Report counts grouped by raw status value, optionally scoped to
    /// one submitter
    async fn count_by_status(&self, user_id: Option<Uuid>) -> AppResult<Vec<(String, u64)>>;

    /// Creation timestamps of reports submitted since `since`
    async fn created_since(&self, since: DateTime<Utc>) -> AppResult<Vec<DateTime<Utc>>>;
}

/// Concrete implementation of ReportRepository backed by SeaORM
pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn grouped_counts(
        &self,
        column: report::Column,
        user_id: Option<Uuid>,
    ) -> AppResult<Vec<(String, u64)>> {
        let mut query = ReportEntity::find()
            .select_only()
            .column(column)
            .column_as(report::Column::Id.count(), "count")
            .group_by(column);

        if let Some(user_id) = user_id {
            query = query.filter(report::Column::UserId.eq(user_id));
        }

        let rows: Vec<(String, i64)> = query.into_tuple().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(key, count)| (key, count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl ReportRepository for ReportStore {
    async fn create(
        &self,
        user_id: Uuid,
        category: Category,
        description: String,
        latitude: f64,
        longitude: f64,
        status: ReportStatus,
    ) -> AppResult<Report> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category: Set(category.as_str().to_string()),
            description: Set(description),
            latitude: Set(latitude),
            longitude: Set(longitude),
            status: Set(status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Report::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Report>> {
        let result = ReportEntity::find_by_id(id).one(&self.db).await?;
        result.map(Report::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Report>> {
        let models = ReportEntity::find()
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(Report::try_from).collect()
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Report>> {
        let models = ReportEntity::find()
            .filter(report::Column::UserId.eq(user_id))
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(Report::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> AppResult<Report> {
        let model = ReportEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Report::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ReportEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, user_id: Option<Uuid>) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;

        let mut query = ReportEntity::find();
        if let Some(user_id) = user_id {
            query = query.filter(report::Column::UserId.eq(user_id));
        }

        query.count(&self.db).await.map_err(Into::into)
    }

    async fn count_by_category(&self, user_id: Option<Uuid>) -> AppResult<Vec<(String, u64)>> {
        self.grouped_counts(report::Column::Category, user_id).await
    }

    async fn count_by_status(&self, user_id: Option<Uuid>) -> AppResult<Vec<(String, u64)>> {
        self.grouped_counts(report::Column::Status, user_id).await
    }

    async fn created_since(&self, since: DateTime<Utc>) -> AppResult<Vec<DateTime<Utc>>> {
        let rows: Vec<DateTime<Utc>> = ReportEntity::find()
            .select_only()
            .column(report::Column::CreatedAt)
            .filter(report::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
