//! Notification database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::notification::{Notification, NotificationType};
use crate::domain::user::Role;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub recipient_role: Option<String>,
    pub message: String,
    pub notification_type: String,
    pub created_at: DateTimeUtc,
    pub sent_at: Option<DateTimeUtc>,
    pub is_read: bool,
    pub report_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Notification {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let notification_type = NotificationType::try_from(model.notification_type.as_str())
            .map_err(|_| {
                AppError::internal(format!(
                    "Corrupt notification type: {}",
                    model.notification_type
                ))
            })?;
        let recipient_role = model
            .recipient_role
            .as_deref()
            .map(|s| {
                Role::try_from(s)
                    .map_err(|_| AppError::internal(format!("Corrupt recipient role: {}", s)))
            })
            .transpose()?;

        Ok(Notification {
            id: model.id,
            recipient_id: model.recipient_id,
            recipient_role,
            message: model.message,
            notification_type,
            created_at: model.created_at,
            sent_at: model.sent_at,
            is_read: model.is_read,
            report_id: model.report_id,
        })
    }
}
