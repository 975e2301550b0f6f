//! Notification repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::notification::{self, ActiveModel, Entity as NotificationEntity};
use crate::domain::notification::{Notification, NotificationType};
use crate::domain::user::Role;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a new notification
    async fn create(
        &self,
        recipient_id: Option<Uuid>,
        recipient_role: Option<Role>,
        message: String,
        notification_type: NotificationType,
        report_id: Option<Uuid>,
    ) -> AppResult<Notification>;

    /// Find notification by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// List all notifications, newest first
    async fn list_all(&self) -> AppResult<Vec<Notification>>;

    /// List notifications addressed to a user directly or via their role
    async fn list_for_recipient(&self, user_id: Uuid, role: Role) -> AppResult<Vec<Notification>>;

    /// Update delivery flags: the read marker and/or the sent timestamp
    async fn update_flags(
        &self,
        id: Uuid,
        is_read: Option<bool>,
        mark_sent: bool,
    ) -> AppResult<Notification>;
}

/// Concrete implementation of NotificationRepository backed by SeaORM
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn create(
        &self,
        recipient_id: Option<Uuid>,
        recipient_role: Option<Role>,
        message: String,
        notification_type: NotificationType,
        report_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            recipient_id: Set(recipient_id),
            recipient_role: Set(recipient_role.map(|r| r.as_str().to_string())),
            message: Set(message),
            notification_type: Set(notification_type.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            sent_at: Set(None),
            is_read: Set(false),
            report_id: Set(report_id),
        };

        let model = active_model.insert(&self.db).await?;
        Notification::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let result = NotificationEntity::find_by_id(id).one(&self.db).await?;
        result.map(Notification::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Notification>> {
        let models = NotificationEntity::find()
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(Notification::try_from).collect()
    }

    async fn list_for_recipient(&self, user_id: Uuid, role: Role) -> AppResult<Vec<Notification>> {
        let models = NotificationEntity::find()
            .filter(
                Condition::any()
                    .add(notification::Column::RecipientId.eq(user_id))
                    .add(notification::Column::RecipientRole.eq(role.as_str())),
            )
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(Notification::try_from).collect()
    }

    async fn update_flags(
        &self,
        id: Uuid,
        is_read: Option<bool>,
        mark_sent: bool,
    ) -> AppResult<Notification> {
        let model = NotificationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(is_read) = is_read {
            active.is_read = Set(is_read);
        }
        if mark_sent {
            active.sent_at = Set(Some(chrono::Utc::now()));
        }

        let model = active.update(&self.db).await?;
        Notification::try_from(model)
    }
}
