//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};
use wh_shared::config::{AuthConfig, UserAccount};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::WarehouseUser;
use crate::domain::value_objects::LoginResult;
use crate::errors::{DomainError, DomainResult};
use crate::services::token::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login gate over the configured dashboard accounts
pub struct AuthService {
    accounts: Vec<UserAccount>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(config: &AuthConfig, token_service: Arc<TokenService>) -> Self {
        Self {
            accounts: config.users.clone(),
            token_service,
        }
    }

    /// Check a username/password pair and issue a session token
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResult)` - Token plus the public user profile
    /// * `Err(DomainError::Validation)` - Username or password is blank
    /// * `Err(DomainError::Unauthorized)` - Unknown user, wrong password or disabled account
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Username and password are required"));
        }

        let account = match self.find_account(username) {
            Some(account) => account,
            None => {
                warn!(username, "Login attempt for unknown user");
                return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
            }
        };

        if !verify_password(password, &account.password_hash).await? {
            warn!(username, "Login attempt with wrong password");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        if !account.active {
            warn!(username, "Login attempt for disabled account");
            return Err(DomainError::unauthorized("Account is disabled"));
        }

        let user = WarehouseUser::from(account);
        let token = self.token_service.issue(&user)?;
        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            token,
            expires_in: self.token_service.expiry_seconds(),
            user,
        })
    }

    /// Profile behind a verified token
    ///
    /// Accounts removed or disabled after the token was issued are refused.
    pub fn current_user(&self, claims: &Claims) -> DomainResult<WarehouseUser> {
        self.find_account(&claims.username)
            .filter(|account| account.active && Some(account.id) == claims.user_id())
            .map(WarehouseUser::from)
            .ok_or_else(|| DomainError::unauthorized("Account is no longer available"))
    }

    fn find_account(&self, username: &str) -> Option<&UserAccount> {
        self.accounts
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }
}

/// Runs the bcrypt comparison on the blocking thread pool
async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Password check aborted: {}", e)))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "Configured password hash is not valid bcrypt");
            Ok(false)
        }
    }
}
