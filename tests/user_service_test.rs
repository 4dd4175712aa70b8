//! User and authentication service tests.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use tienda_api::config::Config;
use tienda_api::domain::Password;
use tienda_api::errors::AppError;
use tienda_api::infra::MockUserRepository;
use tienda_api::services::{AuthService, Authenticator, SignUp, UserManager, UserService};
use tienda_api::types::PaginationParams;

use common::{user, TestUnitOfWork};

fn sign_up(password: &str, confirm: &str) -> SignUp {
    SignUp {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
        password: password.to_string(),
        password_confirm: confirm.to_string(),
    }
}

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(user(id))));

    let service = UserManager::new(TestUnitOfWork::new().with_users(repo).build());
    let result = service.get_user(user_id).await.unwrap();

    assert_eq!(result.id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(TestUnitOfWork::new().with_users(repo).build());
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "User not found"));
}

#[tokio::test]
async fn test_list_users_pages() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .withf(|_, include_deleted| !*include_deleted)
        .returning(|_, _| Ok((vec![user(Uuid::new_v4()), user(Uuid::new_v4())], 12)));

    let service = UserManager::new(TestUnitOfWork::new().with_users(repo).build());
    let page = service
        .list_users(PaginationParams::default(), false)
        .await
        .unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 12);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_update_user_rejects_unknown_role() {
    let service = UserManager::new(TestUnitOfWork::new().build());
    let result = service
        .update_user(Uuid::new_v4(), None, Some("root".to_string()))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_restore_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id_with_deleted().returning(|id| {
        let mut deleted = user(id);
        deleted.deleted_at = Some(chrono::Utc::now());
        Ok(Some(deleted))
    });
    repo.expect_restore().returning(|id| Ok(user(id)));

    let service = UserManager::new(TestUnitOfWork::new().with_users(repo).build());
    let restored = service.restore_user(user_id).await.unwrap();

    assert_eq!(restored.id, user_id);
    assert!(!restored.is_deleted());
}

#[tokio::test]
async fn test_restore_active_user_is_bad_request() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id_with_deleted()
        .returning(|id| Ok(Some(user(id))));
    repo.expect_restore().never();

    let service = UserManager::new(TestUnitOfWork::new().with_users(repo).build());
    let result = service.restore_user(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_signup_password_mismatch() {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();

    let service = Authenticator::new(
        TestUnitOfWork::new().with_users(repo).build(),
        Config::from_env(),
    );
    let result = service.signup(sign_up("secret1", "secret2")).await;

    assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Passwords don't match"));
}

#[tokio::test]
async fn test_signup_taken_username_is_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_username_or_email()
        .withf(|username, email| {
            username.to_string() == "ana" && email.to_string() == "ana@example.com"
        })
        .returning(|_, _| Ok(true));
    repo.expect_create().never();

    let service = Authenticator::new(
        TestUnitOfWork::new().with_users(repo).build(),
        Config::from_env(),
    );
    let result = service.signup(sign_up("secret1", "secret1")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_signup_issues_verifiable_token() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_username_or_email()
        .returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|new_user| new_user.username == "ana" && new_user.password_hash != "secret1")
        .returning(|new_user| {
            let mut created = user(Uuid::new_v4());
            created.username = new_user.username;
            created.email = new_user.email;
            created.password_hash = new_user.password_hash;
            Ok(created)
        });

    let service = Authenticator::new(
        TestUnitOfWork::new().with_users(repo).build(),
        Config::from_env(),
    );
    let token = service.signup(sign_up("secret1", "secret1")).await.unwrap();

    assert_eq!(token.token_type, "Bearer");
    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.username, "ana");
    assert_eq!(claims.role, "user");
}

#[tokio::test]
async fn test_signin_unknown_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let service = Authenticator::new(
        TestUnitOfWork::new().with_users(repo).build(),
        Config::from_env(),
    );
    let result = service
        .signin("ghost".to_string(), "whatever".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_signin_checks_password() {
    let hash = Password::new("secret1").unwrap().into_string();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(move |_| {
        let mut found = user(Uuid::new_v4());
        found.password_hash = hash.clone();
        Ok(Some(found))
    });

    let service = Authenticator::new(
        TestUnitOfWork::new().with_users(repo).build(),
        Config::from_env(),
    );

    let wrong = service
        .signin("tester".to_string(), "nope".to_string())
        .await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let right = service
        .signin("tester".to_string(), "secret1".to_string())
        .await;
    assert!(right.is_ok());
}

#[tokio::test]
async fn test_verify_token_rejects_garbage() {
    let service = Authenticator::new(TestUnitOfWork::new().build(), Config::from_env());
    assert!(service.verify_token("not-a-jwt").is_err());
}
