//! Report database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::report::{Category, Report, ReportStatus};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Report {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let category = Category::try_from(model.category.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt report category: {}", model.category)))?;
        let status = ReportStatus::try_from(model.status.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt report status: {}", model.status)))?;

        Ok(Report {
            id: model.id,
            user_id: model.user_id,
            category,
            description: model.description,
            latitude: model.latitude,
            longitude: model.longitude,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
