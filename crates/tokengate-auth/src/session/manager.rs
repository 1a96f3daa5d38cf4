//! Account lifecycle: registration, sign-in, and credential changes.

use std::sync::Arc;

use tracing::{info, warn};

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_database::UserStore;
use tokengate_entity::user::{NewUser, User, UserRole, UserStatus};

use crate::jwt::TokenCodec;
use crate::password::{PasswordHasher, PasswordValidator};

/// Message used for every credential failure so callers cannot probe for accounts.
const INVALID_CREDENTIALS: &str = "Invalid user id or password";

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Desired login identifier.
    pub user_id: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Registering account's key, when an admin creates the account.
    pub created_by: Option<i64>,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInResult {
    /// The newly issued token, now the account's only live session.
    pub token: String,
    /// The signed-in account as it was before the token was stored.
    pub user: User,
}

/// Drives the account lifecycle on top of a [`UserStore`].
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager.
    pub fn new(
        store: Arc<dyn UserStore>,
        codec: Arc<TokenCodec>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            store,
            codec,
            hasher,
            validator,
        }
    }

    /// Registers an account with no live session.
    pub async fn register(&self, account: NewAccount) -> AppResult<User> {
        let user_id = account.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("User id must not be empty"));
        }
        self.validator.validate(&account.password)?;

        let password_hash = self.hasher.hash_password(&account.password)?;
        let user = self
            .store
            .create(&NewUser {
                user_id: user_id.to_string(),
                password_hash,
                display_name: account.display_name,
                role: account.role,
                created_by: account.created_by,
            })
            .await?;

        info!(user_id = %user.user_id, role = %user.role, "Account registered");
        Ok(user)
    }

    /// Verifies credentials, issues a token, and makes it the live session.
    ///
    /// Any token issued earlier for the same account stops authenticating.
    pub async fn sign_in(&self, user_id: &str, password: &str) -> AppResult<SignInResult> {
        let user = self
            .store
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.user_id, "Sign-in rejected: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !user.can_login() {
            warn!(user_id = %user.user_id, status = %user.status, "Sign-in rejected: account not active");
            return Err(AppError::authentication(format!(
                "Account is {}",
                user.status
            )));
        }

        let token = self.codec.issue_session(&user.user_id, user.role)?;
        self.store.update_token(&user.user_id, &token).await?;

        info!(
            user_id = %user.user_id,
            replaced_session = user.token.is_some(),
            "Sign-in successful"
        );
        Ok(SignInResult { token, user })
    }

    /// Changes a password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.require_user(user_id).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::authentication("Current password is incorrect"));
        }
        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.store.update_password(user_id, &hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Replaces the display name.
    pub async fn update_profile(&self, user_id: &str, display_name: Option<&str>) -> AppResult<User> {
        let display_name = display_name.map(str::trim).filter(|n| !n.is_empty());
        self.store.update_profile(user_id, display_name).await
    }

    /// Activates, deactivates, or locks an account.
    pub async fn set_status(&self, user_id: &str, status: UserStatus) -> AppResult<User> {
        let user = self.store.update_status(user_id, status).await?;
        info!(user_id = %user_id, status = %status, "Account status changed");
        Ok(user)
    }

    /// Fetches an account, failing with `NotFound` when absent.
    pub async fn require_user(&self, user_id: &str) -> AppResult<User> {
        self.store
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{user_id}' not found")))
    }

    /// Lists every account.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.find_all().await
    }

    /// Creates an administrator account unless `user_id` already exists.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, user_id: &str, password: &str) -> AppResult<bool> {
        if self.store.find_by_user_id(user_id).await?.is_some() {
            return Ok(false);
        }
        self.register(NewAccount {
            user_id: user_id.to_string(),
            password: password.to_string(),
            display_name: None,
            role: UserRole::Admin,
            created_by: None,
        })
        .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tokengate_core::error::ErrorKind;
    use tokengate_database::MemoryUserStore;

    use crate::jwt::SigningSecret;

    fn manager() -> (SessionManager, Arc<TokenCodec>, Arc<MemoryUserStore>) {
        let secret = SigningSecret::new("manager-secret").unwrap();
        let codec = Arc::new(TokenCodec::new(&secret, Duration::hours(24)).unwrap());
        let store = Arc::new(MemoryUserStore::new());
        let manager = SessionManager::new(
            store.clone(),
            codec.clone(),
            Arc::new(PasswordHasher::new()),
            PasswordValidator::new(8),
        );
        (manager, codec, store)
    }

    fn account(user_id: &str) -> NewAccount {
        NewAccount {
            user_id: user_id.to_string(),
            password: "password123".to_string(),
            display_name: Some("Alice".to_string()),
            role: UserRole::User,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (manager, _, _) = manager();
        let user = manager.register(account("alice")).await.unwrap();
        assert_ne!(user.password_hash, "password123");
        assert!(user.token.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let (manager, _, _) = manager();
        let mut weak = account("alice");
        weak.password = "short".to_string();
        let err = manager.register(weak).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_sign_in_stores_current_token() {
        let (manager, codec, store) = manager();
        manager.register(account("alice")).await.unwrap();

        let result = manager.sign_in("alice", "password123").await.unwrap();
        assert!(codec.is_valid(&result.token));

        let stored = store.find_by_user_id("alice").await.unwrap().unwrap();
        assert!(stored.is_current_token(&result.token));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_and_unknown_user_look_alike() {
        let (manager, _, _) = manager();
        manager.register(account("alice")).await.unwrap();

        let wrong = manager.sign_in("alice", "nope-nope").await.unwrap_err();
        let unknown = manager.sign_in("bob", "password123").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn test_locked_account_cannot_sign_in() {
        let (manager, _, _) = manager();
        manager.register(account("alice")).await.unwrap();
        manager
            .set_status("alice", UserStatus::Locked)
            .await
            .unwrap();
        let err = manager.sign_in("alice", "password123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_change_password() {
        let (manager, _, _) = manager();
        manager.register(account("alice")).await.unwrap();

        let err = manager
            .change_password("alice", "wrong-password", "brand-new-pass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = manager
            .change_password("alice", "password123", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        manager
            .change_password("alice", "password123", "brand-new-pass")
            .await
            .unwrap();
        assert!(manager.sign_in("alice", "password123").await.is_err());
        assert!(manager.sign_in("alice", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let (manager, _, store) = manager();
        assert!(manager.ensure_admin("root", "admin-pass-1").await.unwrap());
        assert!(!manager.ensure_admin("root", "other-pass-2").await.unwrap());

        let root = store.find_by_user_id("root").await.unwrap().unwrap();
        assert!(root.is_admin());
        assert!(manager.sign_in("root", "admin-pass-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_last_sign_in_wins() {
        let (manager, _, store) = manager();
        manager.register(account("alice")).await.unwrap();

        let first = manager.sign_in("alice", "password123").await.unwrap();
        let second = manager.sign_in("alice", "password123").await.unwrap();

        let stored = store.find_by_user_id("alice").await.unwrap().unwrap();
        assert!(stored.is_current_token(&second.token));
        if first.token != second.token {
            assert!(!stored.is_current_token(&first.token));
        }
    }

    #[tokio::test]
    async fn test_update_profile_blank_clears_name() {
        let (manager, _, _) = manager();
        manager.register(account("alice")).await.unwrap();
        let user = manager.update_profile("alice", Some("   ")).await.unwrap();
        assert!(user.display_name.is_none());
        let user = manager.update_profile("alice", Some("Al")).await.unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Al"));
    }
}
