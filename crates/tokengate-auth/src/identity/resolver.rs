//! Mapping a token subject to a principal.

use std::sync::Arc;

use async_trait::async_trait;

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_database::UserStore;

use super::principal::Principal;

/// Resolves a subject string into a full principal.
///
/// An unknown subject is an `Authentication` error; storage failures keep
/// their own kind.
#[async_trait]
pub trait IdentityResolver: Send + Sync + std::fmt::Debug + 'static {
    /// Load the principal for `subject`.
    async fn resolve(&self, subject: &str) -> AppResult<Principal>;
}

/// Resolves principals from a [`UserStore`].
#[derive(Debug, Clone)]
pub struct StoreIdentityResolver {
    store: Arc<dyn UserStore>,
}

impl StoreIdentityResolver {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityResolver for StoreIdentityResolver {
    async fn resolve(&self, subject: &str) -> AppResult<Principal> {
        self.store
            .find_by_user_id(subject)
            .await?
            .map(|user| Principal::from_user(&user))
            .ok_or_else(|| AppError::authentication(format!("Unknown identity '{subject}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokengate_core::error::ErrorKind;
    use tokengate_database::MemoryUserStore;
    use tokengate_entity::user::{NewUser, UserRole, UserStatus};

    async fn store_with(user_id: &str, role: UserRole) -> Arc<MemoryUserStore> {
        let store = Arc::new(MemoryUserStore::new());
        store
            .create(&NewUser {
                user_id: user_id.to_string(),
                password_hash: "hash".to_string(),
                display_name: Some("Display".to_string()),
                role,
                created_by: None,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_resolves_role_from_store() {
        let store = store_with("root", UserRole::Admin).await;
        let resolver = StoreIdentityResolver::new(store);
        let principal = resolver.resolve("root").await.unwrap();
        assert_eq!(principal.role, UserRole::Admin);
        assert_eq!(principal.display_name.as_deref(), Some("Display"));
        assert!(principal.is_usable());
    }

    #[tokio::test]
    async fn test_unknown_identity_is_authentication_error() {
        let resolver = StoreIdentityResolver::new(Arc::new(MemoryUserStore::new()));
        let err = resolver.resolve("ghost").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_locked_account_not_usable() {
        let store = store_with("alice", UserRole::User).await;
        store.update_status("alice", UserStatus::Locked).await.unwrap();
        let principal = StoreIdentityResolver::new(store)
            .resolve("alice")
            .await
            .unwrap();
        assert!(principal.enabled);
        assert!(principal.locked);
        assert!(!principal.is_usable());
    }
}
