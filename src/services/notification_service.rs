//! Notification service - listing, creation, and delivery-flag updates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{validate_message, Notification, NotificationType};
use crate::domain::policy::{self, Action, Actor};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// List notifications: everything for admins, own (direct or
    /// role-addressed) for everyone else. Newest first.
    async fn list_notifications(&self, actor: &Actor) -> AppResult<Vec<Notification>>;

    /// Create a notification addressed to the acting user
    async fn create_notification(
        &self,
        actor: &Actor,
        message: String,
        notification_type: NotificationType,
        report_id: Option<Uuid>,
    ) -> AppResult<Notification>;

    /// Update delivery flags on a notification (recipient or admin)
    async fn update_notification(
        &self,
        actor: &Actor,
        id: Uuid,
        is_read: Option<bool>,
        mark_sent: bool,
    ) -> AppResult<Notification>;
}

/// Concrete implementation of NotificationService using Unit of Work.
pub struct Notifier<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Notifier<U> {
    /// Create new notification service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for Notifier<U> {
    async fn list_notifications(&self, actor: &Actor) -> AppResult<Vec<Notification>> {
        match policy::authorize(actor, Action::ListAllNotifications) {
            Ok(()) => self.uow.notifications().list_all().await,
            Err(AppError::Forbidden) => {
                let (id, role) = match (actor.id(), actor.role()) {
                    (Some(id), Some(role)) => (id, role),
                    _ => return Err(AppError::Unauthorized),
                };
                self.uow.notifications().list_for_recipient(id, role).await
            }
            Err(e) => Err(e),
        }
    }

    async fn create_notification(
        &self,
        actor: &Actor,
        message: String,
        notification_type: NotificationType,
        report_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        let recipient = actor.id().ok_or(AppError::Unauthorized)?;
        validate_message(&message)?;

        self.uow
            .notifications()
            .create(Some(recipient), None, message, notification_type, report_id)
            .await
    }

    async fn update_notification(
        &self,
        actor: &Actor,
        id: Uuid,
        is_read: Option<bool>,
        mark_sent: bool,
    ) -> AppResult<Notification> {
        if actor.id().is_none() {
            return Err(AppError::Unauthorized);
        }

        let notification = self
            .uow
            .notifications()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        policy::authorize(
            actor,
            Action::UpdateNotification {
                recipient: notification.recipient_id,
            },
        )?;

        self.uow
            .notifications()
            .update_flags(id, is_read, mark_sent)
            .await
    }
}
