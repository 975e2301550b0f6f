//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::insert_error;
use crate::domain::user::{AccountStatus, Role, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(
        &self,
        email: String,
        username: String,
        password_hash: String,
        role: Role,
        status: AccountStatus,
    ) -> AppResult<User>;

    /// Update profile fields (email and/or username)
    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        username: Option<String>,
    ) -> AppResult<User>;

    /// Set a user's role
    async fn set_role(&self, id: Uuid, role: Role) -> AppResult<User>;

    /// Set a user's account status
    async fn set_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// List users holding a given role
    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        result.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        result.map(User::try_from).transpose()
    }

    async fn create(
        &self,
        email: String,
        username: String,
        password_hash: String,
        role: Role,
        status: AccountStatus,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            status: Set(status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "User with this email"))?;
        User::try_from(model)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        username: Option<String>,
    ) -> AppResult<User> {
        let model = self.fetch(id).await?;
        let mut active: ActiveModel = model.into();

        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(username) = username {
            active.username = Set(username);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| insert_error(e, "User with this email"))?;
        User::try_from(model)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> AppResult<User> {
        let model = self.fetch(id).await?;
        let mut active: ActiveModel = model.into();

        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        User::try_from(model)
    }

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User> {
        let model = self.fetch(id).await?;
        let mut active: ActiveModel = model.into();

        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        User::try_from(model)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find().all(&self.db).await?;
        models.into_iter().map(User::try_from).collect()
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .all(&self.db)
            .await?;
        models.into_iter().map(User::try_from).collect()
    }
}
