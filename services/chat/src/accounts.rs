//! Registration and login

use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    repositories::UserRepository,
    validation::validate_username,
};

/// Account manager backed by the users table
///
/// Passwords are stored as given and compared by exact equality. Login does
/// not issue any token; callers identify themselves by username afterwards.
#[derive(Clone)]
pub struct AccountManager {
    users: UserRepository,
}

impl AccountManager {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user. Fails with [`ApiError::Conflict`] if the username
    /// is taken.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<()> {
        info!("Registering user: {}", username);

        validate_username(username).map_err(ApiError::BadRequest)?;

        if self.users.find_by_username(username).await?.is_some() {
            warn!("Username already taken: {}", username);
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        match self.users.create(username, password).await {
            Ok(_) => Ok(()),
            // lost a race with a concurrent registration
            Err(e) if e.is_unique_violation() => {
                warn!("Username already taken: {}", username);
                Err(ApiError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        info!("Login attempt for user: {}", username);

        match self.users.find_by_credentials(username, password).await? {
            Some(_) => Ok(()),
            None => {
                warn!("Invalid login for user: {}", username);
                Err(ApiError::Unauthorized("Invalid login".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;

    async fn manager() -> AccountManager {
        AccountManager::new(UserRepository::new(test_pool().await))
    }

    #[tokio::test]
    async fn test_register_then_login_scenario() {
        let accounts = manager().await;

        accounts.register("alice", "pw1").await.unwrap();
        assert!(matches!(
            accounts.register("alice", "pw2").await,
            Err(ApiError::Conflict(_))
        ));
        accounts.login("alice", "pw1").await.unwrap();
        assert!(matches!(
            accounts.login("alice", "pw2").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_conflict_keeps_original_password() {
        let accounts = manager().await;

        accounts.register("alice", "pw1").await.unwrap();
        let _ = accounts.register("alice", "pw2").await;

        assert!(accounts.login("alice", "pw1").await.is_ok());
        assert!(accounts.login("alice", "pw2").await.is_err());
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let accounts = manager().await;

        assert!(matches!(
            accounts.login("nobody", "pw").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_login_is_exact_match() {
        let accounts = manager().await;
        accounts.register("alice", "Secret").await.unwrap();

        assert!(accounts.login("alice", "secret").await.is_err());
        assert!(accounts.login("Alice", "Secret").await.is_err());
        assert!(accounts.login("alice", "Secret ").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let accounts = manager().await;

        assert!(matches!(
            accounts.register("", "pw").await,
            Err(ApiError::BadRequest(_))
        ));
    }
}
