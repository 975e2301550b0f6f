//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::user::{AccountStatus, Role, User};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// A row with an unparseable role or status is data corruption, not a
/// client error, so the failure surfaces as an internal error.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let role = Role::try_from(model.role.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt user role: {}", model.role)))?;
        let status = AccountStatus::try_from(model.status.as_str())
            .map_err(|_| AppError::internal(format!("Corrupt user status: {}", model.status)))?;

        Ok(User {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            role,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
