//! Notification domain entity.
//!
//! Notifications are write-mostly rows: created on system events (new
//! aggregate rows, spike detection) or directly by a user, and mutated only
//! to flip the read flag or record a sent timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::MAX_NOTIFICATION_MESSAGE_LENGTH;
use crate::domain::user::Role;
use crate::errors::{AppError, AppResult};

/// The notification kinds a row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Acknowledgment,
    StatusUpdate,
    Resolution,
    NewIncident,
    GeoFence,
    CrimeTrend,
    PublicSafety,
    FollowUp,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Acknowledgment => "acknowledgment",
            NotificationType::StatusUpdate => "status_update",
            NotificationType::Resolution => "resolution",
            NotificationType::NewIncident => "new_incident",
            NotificationType::GeoFence => "geo_fence",
            NotificationType::CrimeTrend => "crime_trend",
            NotificationType::PublicSafety => "public_safety",
            NotificationType::FollowUp => "follow_up",
        }
    }
}

impl TryFrom<&str> for NotificationType {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "acknowledgment" => Ok(NotificationType::Acknowledgment),
            "status_update" => Ok(NotificationType::StatusUpdate),
            "resolution" => Ok(NotificationType::Resolution),
            "new_incident" => Ok(NotificationType::NewIncident),
            "geo_fence" => Ok(NotificationType::GeoFence),
            "crime_trend" => Ok(NotificationType::CrimeTrend),
            "public_safety" => Ok(NotificationType::PublicSafety),
            "follow_up" => Ok(NotificationType::FollowUp),
            other => Err(AppError::validation(format!(
                "Invalid notification type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a notification message against the length contract.
pub fn validate_message(message: &str) -> AppResult<()> {
    if message.chars().count() as u64 > MAX_NOTIFICATION_MESSAGE_LENGTH {
        return Err(AppError::validation(format!(
            "Message cannot exceed {} characters",
            MAX_NOTIFICATION_MESSAGE_LENGTH
        )));
    }
    Ok(())
}

/// Notification domain entity.
///
/// Addressed either to a specific user (`recipient_id`) or to a whole role
/// class (`recipient_role`); at least one of the two is always set.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub recipient_role: Option<Role>,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    /// Weak reference for display; cascades away when the report is deleted.
    pub report_id: Option<Uuid>,
}

/// Notification response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub recipient_id: Option<Uuid>,
    #[schema(example = "admin")]
    pub recipient_role: Option<Role>,
    pub message: String,
    #[schema(example = "crime_trend")]
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub report_id: Option<Uuid>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            recipient_id: n.recipient_id,
            recipient_role: n.recipient_role,
            message: n.message,
            notification_type: n.notification_type,
            created_at: n.created_at,
            sent_at: n.sent_at,
            is_read: n.is_read,
            report_id: n.report_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_length_boundary() {
        assert!(validate_message(&"x".repeat(500)).is_ok());
        assert!(validate_message(&"x".repeat(501)).is_err());
        assert!(validate_message("").is_ok());
    }

    #[test]
    fn type_parse_round_trip() {
        for kind in [
            NotificationType::Acknowledgment,
            NotificationType::StatusUpdate,
            NotificationType::Resolution,
            NotificationType::NewIncident,
            NotificationType::GeoFence,
            NotificationType::CrimeTrend,
            NotificationType::PublicSafety,
            NotificationType::FollowUp,
        ] {
            assert_eq!(NotificationType::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(NotificationType::try_from("carrier_pigeon").is_err());
    }
}
