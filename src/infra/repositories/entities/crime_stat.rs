//! CrimeStat database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::crime_stat::CrimeStat;
use crate::domain::report::{Category, ReportStatus};
use crate::domain::user::Role;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crime_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub incident_type: String,
    pub user_role: String,
    pub status: String,
    pub total_reports: i32,
    pub pending: i32,
    pub in_progress: i32,
    pub resolved: i32,
    pub rejected: i32,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CrimeStat {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let incident_type = Category::try_from(model.incident_type.as_str()).map_err(|_| {
            AppError::internal(format!("Corrupt incident type: {}", model.incident_type))
        })?;
        let user_role = Role::try_from(model.user_role.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt user role: {}", model.user_role)))?;
        let status = ReportStatus::try_from(model.status.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt status: {}", model.status)))?;

        Ok(CrimeStat {
            id: model.id,
            incident_type,
            user_role,
            status,
            total_reports: model.total_reports.max(0) as u32,
            pending: model.pending.max(0) as u32,
            in_progress: model.in_progress.max(0) as u32,
            resolved: model.resolved.max(0) as u32,
            rejected: model.rejected.max(0) as u32,
            start_date: model.start_date,
            end_date: model.end_date,
            updated_at: model.updated_at,
        })
    }
}
