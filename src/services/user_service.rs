//! User service - profile access and admin account management.
//!
//! Every operation takes the acting principal and consults the policy layer
//! before touching anything; handlers never make role decisions themselves.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::policy::{self, Action, Actor};
use crate::domain::user::{ReviewAction, Role, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get the acting user's own profile
    async fn get_profile(&self, actor: &Actor) -> AppResult<User>;

    /// Update the acting user's own profile (email and/or username).
    ///
    /// Role and status are not profile fields; a request carrying either is
    /// rejected before any fetch.
    async fn update_profile(
        &self,
        actor: &Actor,
        email: Option<String>,
        username: Option<String>,
        touches_role_or_status: bool,
    ) -> AppResult<User>;

    /// List all users (admin only)
    async fn list_users(&self, actor: &Actor) -> AppResult<Vec<User>>;

    /// Approve or reject a pending law enforcement account (admin only)
    async fn review(&self, actor: &Actor, target_id: Uuid, action: ReviewAction)
        -> AppResult<User>;

    /// Change another user's role (admin only)
    async fn change_role(&self, actor: &Actor, target_id: Uuid, role: Role) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_profile(&self, actor: &Actor) -> AppResult<User> {
        let id = actor.id().ok_or(AppError::Unauthorized)?;
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_profile(
        &self,
        actor: &Actor,
        email: Option<String>,
        username: Option<String>,
        touches_role_or_status: bool,
    ) -> AppResult<User> {
        let id = actor.id().ok_or(AppError::Unauthorized)?;

        if touches_role_or_status {
            policy::authorize(actor, Action::ChangeOwnRoleOrStatus)?;
        }

        self.uow.users().update_profile(id, email, username).await
    }

    async fn list_users(&self, actor: &Actor) -> AppResult<Vec<User>> {
        policy::authorize(actor, Action::ListUsers)?;
        self.uow.users().list().await
    }

    async fn review(
        &self,
        actor: &Actor,
        target_id: Uuid,
        action: ReviewAction,
    ) -> AppResult<User> {
        policy::authorize(actor, Action::ReviewOfficer)?;

        let target = self
            .uow
            .users()
            .find_by_id(target_id)
            .await?
            .ok_or_not_found()?;
        policy::ensure_reviewable(&target)?;

        let status = action.resulting_status();
        let user = self.uow.users().set_status(target_id, status).await?;

        tracing::info!(target = %target_id, status = %status, "Law enforcement account reviewed");
        Ok(user)
    }

    async fn change_role(&self, actor: &Actor, target_id: Uuid, role: Role) -> AppResult<User> {
        policy::authorize(actor, Action::ChangeUserRole)?;

        // Existence check gives 404 before any write
        self.uow
            .users()
            .find_by_id(target_id)
            .await?
            .ok_or_not_found()?;

        let user = self.uow.users().set_role(target_id, role).await?;

        tracing::info!(target = %target_id, role = %role, "User role changed");
        Ok(user)
    }
}
