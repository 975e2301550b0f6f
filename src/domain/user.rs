//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_LAW_ENFORCEMENT};
use crate::errors::{AppError, AppResult};

/// User roles as a closed enumeration.
///
/// Role strings coming off the wire (JWT claims, request bodies) must parse
/// into this enum; anything else is rejected fail-closed rather than being
/// coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    LawEnforcement,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Check if this role may triage reports (update status, list all)
    pub fn is_officer(&self) -> bool {
        matches!(self, Role::LawEnforcement | Role::Admin)
    }

    /// Roles accepted through self-service registration.
    pub fn is_registrable(&self) -> bool {
        matches!(self, Role::Citizen | Role::LawEnforcement)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => ROLE_CITIZEN,
            Role::LawEnforcement => ROLE_LAW_ENFORCEMENT,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            ROLE_CITIZEN => Ok(Role::Citizen),
            ROLE_LAW_ENFORCEMENT => Ok(Role::LawEnforcement),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(AppError::validation(format!("Invalid role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account approval status.
///
/// Citizens are approved at registration; law enforcement accounts start
/// pending and move to approved/rejected only through admin review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    /// Initial status implied by a registration role.
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::LawEnforcement => AccountStatus::Pending,
            _ => AccountStatus::Approved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Approved => "approved",
            AccountStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for AccountStatus {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "pending" => Ok(AccountStatus::Pending),
            "approved" => Ok(AccountStatus::Approved),
            "rejected" => Ok(AccountStatus::Rejected),
            other => Err(AppError::validation(format!(
                "Invalid status: {}. Allowed values are 'pending', 'approved' and 'rejected'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an admin review of a pending law enforcement account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Status resulting from this review action.
    pub fn resulting_status(&self) -> AccountStatus {
        match self {
            ReviewAction::Approve => AccountStatus::Approved,
            ReviewAction::Reject => AccountStatus::Rejected,
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Derive a username from an email's local part, used at registration when
/// no explicit username is supplied.
pub fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "citizen@example.com")]
    pub email: String,
    /// Display username (derived from email when not supplied)
    #[schema(example = "citizen")]
    pub username: String,
    /// User role
    #[schema(example = "citizen")]
    pub role: Role,
    /// Account approval status
    #[schema(example = "approved")]
    pub status: AccountStatus,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}
