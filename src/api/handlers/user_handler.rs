//! User handlers - own profile plus admin account management.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::user::{ReviewAction, Role};
use crate::domain::UserResponse;
use crate::errors::AppResult;

/// Profile update request.
///
/// Role and status are deliberately accepted by the deserializer so that a
/// request carrying them can be refused with 403 instead of being silently
/// ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
    /// New display name
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    #[schema(example = "jane")]
    pub username: Option<String>,
    /// Present only in rejected requests; self-service role changes are
    /// always denied
    pub role: Option<String>,
    /// Present only in rejected requests; self-service status changes are
    /// always denied
    pub status: Option<String>,
}

/// Admin review of a pending law enforcement account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    /// "approve" or "reject"
    #[schema(example = "approve")]
    pub action: ReviewAction,
}

/// Admin role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    /// New role for the target user
    #[schema(example = "law_enforcement")]
    pub role: Role,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user).put(update_current_user))
        .route("/:id/review", post(review_user))
        .route("/:id/role", patch(change_role))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_profile(&current_user.actor()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Request attempted to change role or status")
    )
)]
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let touches_role_or_status = payload.role.is_some() || payload.status.is_some();

    let user = state
        .user_service
        .update_profile(
            &current_user.actor(),
            payload.email,
            payload.username,
            touches_role_or_status,
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All user accounts", body = [UserResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users(&current_user.actor()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Approve or reject a pending law enforcement account (admin only)
#[utoipa::path(
    post,
    path = "/users/{id}/review",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Target user id")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Account reviewed", body = UserResponse),
        (status = 400, description = "Target is not a law enforcement officer"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn review_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .review(&current_user.actor(), id, payload.action)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Change a user's role (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}/role",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Target user id")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_role(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .change_role(&current_user.actor(), id, payload.role)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
