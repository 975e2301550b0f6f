//! Authentication and user service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::{always, eq};
use uuid::Uuid;

use crimewatch::config::Config;
use crimewatch::domain::user::{AccountStatus, ReviewAction, Role};
use crimewatch::domain::Password;
use crimewatch::errors::AppError;
use crimewatch::infra::repositories::MockUserRepository;
use crimewatch::services::{AuthService, Authenticator, UserManager, UserService};

use common::{actor, actor_with_id, test_user, TestUnitOfWork};

fn auth_service(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    let uow = TestUnitOfWork::default().with_users(repo);
    Authenticator::new(Arc::new(uow), Config::for_tests())
}

#[tokio::test]
async fn admin_registration_is_rejected() {
    // No expectations: the role gate fires before any repository access
    let service = auth_service(MockUserRepository::new());

    let result = service
        .register(
            "admin@example.com".to_string(),
            None,
            "password123".to_string(),
            Role::Admin,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn citizen_registration_is_approved_immediately() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_create()
        .with(
            always(),
            always(),
            always(),
            eq(Role::Citizen),
            eq(AccountStatus::Approved),
        )
        .returning(|email, username, password_hash, role, status| {
            let mut user = test_user(Uuid::new_v4(), role, status);
            user.email = email;
            user.username = username;
            user.password_hash = password_hash;
            Ok(user)
        });

    let service = auth_service(repo);

    let user = service
        .register(
            "jane@example.com".to_string(),
            None,
            "password123".to_string(),
            Role::Citizen,
        )
        .await
        .unwrap();

    assert_eq!(user.status, AccountStatus::Approved);
    // Username falls back to the email local part
    assert_eq!(user.username, "jane");
    // The raw password is never stored
    assert_ne!(user.password_hash, "password123");
}

#[tokio::test]
async fn law_enforcement_registration_starts_pending() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_create()
        .with(
            always(),
            always(),
            always(),
            eq(Role::LawEnforcement),
            eq(AccountStatus::Pending),
        )
        .returning(|_, _, _, role, status| Ok(test_user(Uuid::new_v4(), role, status)));

    let service = auth_service(repo);

    let user = service
        .register(
            "officer@example.com".to_string(),
            Some("officer".to_string()),
            "password123".to_string(),
            Role::LawEnforcement,
        )
        .await
        .unwrap();

    assert_eq!(user.status, AccountStatus::Pending);
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| {
        Ok(Some(test_user(
            Uuid::new_v4(),
            Role::Citizen,
            AccountStatus::Approved,
        )))
    });

    let service = auth_service(repo);

    let result = service
        .register(
            "taken@example.com".to_string(),
            None,
            "password123".to_string(),
            Role::Citizen,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn login_round_trip_issues_a_verifiable_token() {
    let user_id = Uuid::new_v4();
    let hash = Password::new("correct horse").unwrap().into_string();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .with(eq("jane@example.com"))
        .returning(move |_| {
            let mut user = test_user(user_id, Role::Citizen, AccountStatus::Approved);
            user.email = "jane@example.com".to_string();
            user.password_hash = hash.clone();
            Ok(Some(user))
        });

    let service = auth_service(repo);

    let token = service
        .login("jane@example.com".to_string(), "correct horse".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "citizen");
    assert_eq!(claims.status, "approved");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let hash = Password::new("correct horse").unwrap().into_string();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(move |_| {
        let mut user = test_user(Uuid::new_v4(), Role::Citizen, AccountStatus::Approved);
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let service = auth_service(repo);

    let result = service
        .login("jane@example.com".to_string(), "battery staple".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_email_is_invalid_credentials() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));

    let service = auth_service(repo);

    let result = service
        .login("nobody@example.com".to_string(), "whatever1".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn profile_update_touching_role_or_status_is_forbidden() {
    // No repository expectations: the request must be refused before any write
    let uow = TestUnitOfWork::default();
    let service = UserManager::new(Arc::new(uow));

    let result = service
        .update_profile(
            &actor(Role::Citizen),
            Some("new@example.com".to_string()),
            None,
            true,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn profile_update_changes_email_and_username() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_update_profile()
        .with(
            eq(user_id),
            eq(Some("new@example.com".to_string())),
            eq(Some("newname".to_string())),
        )
        .returning(|id, email, username| {
            let mut user = test_user(id, Role::Citizen, AccountStatus::Approved);
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(username) = username {
                user.username = username;
            }
            Ok(user)
        });

    let uow = TestUnitOfWork::default().with_users(repo);
    let service = UserManager::new(Arc::new(uow));

    let user = service
        .update_profile(
            &actor_with_id(user_id, Role::Citizen),
            Some("new@example.com".to_string()),
            Some("newname".to_string()),
            false,
        )
        .await
        .unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.username, "newname");
}

#[tokio::test]
async fn listing_users_is_admin_only() {
    let uow = TestUnitOfWork::default();
    let service = UserManager::new(Arc::new(uow));

    let result = service.list_users(&actor(Role::LawEnforcement)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn review_approves_a_pending_officer() {
    let target_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().with(eq(target_id)).returning(|id| {
        Ok(Some(test_user(
            id,
            Role::LawEnforcement,
            AccountStatus::Pending,
        )))
    });
    repo.expect_set_status()
        .with(eq(target_id), eq(AccountStatus::Approved))
        .returning(|id, status| Ok(test_user(id, Role::LawEnforcement, status)));

    let uow = TestUnitOfWork::default().with_users(repo);
    let service = UserManager::new(Arc::new(uow));

    let user = service
        .review(&actor(Role::Admin), target_id, ReviewAction::Approve)
        .await
        .unwrap();

    assert_eq!(user.status, AccountStatus::Approved);
}

#[tokio::test]
async fn reviewing_a_citizen_is_a_validation_error() {
    let target_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(target_id))
        .returning(|id| Ok(Some(test_user(id, Role::Citizen, AccountStatus::Approved))));
    repo.expect_set_status().times(0);

    let uow = TestUnitOfWork::default().with_users(repo);
    let service = UserManager::new(Arc::new(uow));

    let result = service
        .review(&actor(Role::Admin), target_id, ReviewAction::Approve)
        .await;

    match result.unwrap_err() {
        AppError::Validation(msg) => {
            assert!(msg.contains("not a law enforcement officer"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn review_of_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::default().with_users(repo);
    let service = UserManager::new(Arc::new(uow));

    let result = service
        .review(&actor(Role::Admin), Uuid::new_v4(), ReviewAction::Reject)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn role_change_is_admin_only() {
    let uow = TestUnitOfWork::default();
    let service = UserManager::new(Arc::new(uow));

    let result = service
        .change_role(&actor(Role::Citizen), Uuid::new_v4(), Role::Admin)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn admin_promotes_a_user() {
    let target_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(target_id))
        .returning(|id| Ok(Some(test_user(id, Role::Citizen, AccountStatus::Approved))));
    repo.expect_set_role()
        .with(eq(target_id), eq(Role::Admin))
        .returning(|id, role| Ok(test_user(id, role, AccountStatus::Approved)));

    let uow = TestUnitOfWork::default().with_users(repo);
    let service = UserManager::new(Arc::new(uow));

    let user = service
        .change_role(&actor(Role::Admin), target_id, Role::Admin)
        .await
        .unwrap();

    assert_eq!(user.role, Role::Admin);
}
