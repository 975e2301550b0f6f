//! Notification handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::notification::NotificationType;
use crate::domain::NotificationResponse;
use crate::errors::AppResult;

/// Notification creation request; the recipient is always the acting user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    /// Message body (at most 500 characters)
    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    #[schema(example = "Your report has been received", max_length = 500)]
    pub message: String,
    /// Notification kind
    #[schema(example = "acknowledgment")]
    pub notification_type: NotificationType,
    /// Optional report this notification refers to
    pub report_id: Option<Uuid>,
}

/// Delivery-flag update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNotificationRequest {
    /// New read flag
    pub is_read: Option<bool>,
    /// When true, stamps sent_at with the current time
    #[serde(default)]
    pub mark_sent: bool,
}

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/:id", patch(update_notification))
}

/// List notifications: all for admins, own for everyone else
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications visible to the caller, newest first", body = [NotificationResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_notifications(&current_user.actor())
        .await?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Create a notification addressed to the acting user
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Message too long"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateNotificationRequest>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    let notification = state
        .notification_service
        .create_notification(
            &current_user.actor(),
            payload.message,
            payload.notification_type,
            payload.report_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(notification)),
    ))
}

/// Update delivery flags on a notification (recipient or admin)
#[utoipa::path(
    patch,
    path = "/notifications/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification id")),
    request_body = UpdateNotificationRequest,
    responses(
        (status = 200, description = "Notification updated", body = NotificationResponse),
        (status = 403, description = "Not the recipient and not an admin"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn update_notification(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNotificationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    let notification = state
        .notification_service
        .update_notification(&current_user.actor(), id, payload.is_read, payload.mark_sent)
        .await?;

    Ok(Json(NotificationResponse::from(notification)))
}
