//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::policy::Actor;
use crate::domain::user::{AccountStatus, Role};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token.
///
/// Role and status are parsed into their closed enums here; a token carrying
/// an unknown role or status string is rejected fail-closed rather than
/// reaching a handler.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl CurrentUser {
    /// The policy-layer principal for this request.
    pub fn actor(&self) -> Actor {
        Actor::user(self.id, self.role, self.status)
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let role = Role::try_from(claims.role.as_str()).map_err(|_| AppError::Unauthorized)?;
    let status =
        AccountStatus::try_from(claims.status.as_str()).map_err(|_| AppError::Unauthorized)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role,
        status,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
