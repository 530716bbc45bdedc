//! Unit tests for authentication service

use std::sync::Arc;
use wh_shared::config::{AuthConfig, UserAccount};

use crate::errors::DomainError;
use crate::services::auth::AuthService;
use crate::services::token::{TokenService, TokenServiceConfig};

fn account(id: i64, username: &str, password: &str, active: bool) -> UserAccount {
    UserAccount {
        id,
        username: username.to_string(),
        password_hash: bcrypt::hash(password, 4).unwrap(),
        display_name: None,
        role: "staff".to_string(),
        permissions: vec![],
        active,
    }
}

fn service() -> (AuthService, Arc<TokenService>) {
    let config = AuthConfig {
        users: vec![
            account(1, "admin", "s3cret", true),
            account(2, "former", "s3cret", false),
        ],
        ..Default::default()
    };
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
    (AuthService::new(&config, tokens.clone()), tokens)
}

#[tokio::test]
async fn test_login_success() {
    let (service, tokens) = service();
    let result = service.login("Admin", "s3cret").await.unwrap();

    assert_eq!(result.user.id, 1);
    assert_eq!(result.user.display_name, "admin");
    assert_eq!(result.expires_in, 86_400);

    let claims = tokens.verify(&result.token).unwrap();
    assert_eq!(claims.username, "admin");
    assert_eq!(service.current_user(&claims).unwrap().id, 1);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, _) = service();
    let err = service.login("admin", "nope").await.unwrap_err();
    assert_eq!(err, DomainError::unauthorized("Invalid username or password"));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (service, _) = service();
    let err = service.login("ghost", "s3cret").await.unwrap_err();
    assert_eq!(err, DomainError::unauthorized("Invalid username or password"));
}

#[tokio::test]
async fn test_login_disabled_account() {
    let (service, _) = service();
    let err = service.login("former", "s3cret").await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_login_blank_fields() {
    let (service, _) = service();
    let err = service.login("  ", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}
