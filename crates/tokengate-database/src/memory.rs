//! In-process user store backed by a concurrent map.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_entity::user::{NewUser, User, UserStatus};

use crate::store::UserStore;

/// User store that keeps records in memory, keyed by login identifier.
///
/// Used by tests and by local runs without PostgreSQL. Writes follow the
/// same last-writer-wins semantics as the database repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
    next_seq: Arc<AtomicI64>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn modify<F>(&self, user_id: &str, apply: F) -> AppResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut entry = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("User '{user_id}' not found")))?;
        apply(entry.value_mut());
        entry.updated_at = Some(Utc::now());
        Ok(entry.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.value().clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.seq);
        Ok(users)
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        match self.users.entry(data.user_id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "User '{}' already exists",
                data.user_id
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    seq: self.next_seq.fetch_add(1, Ordering::SeqCst) + 1,
                    user_id: data.user_id.clone(),
                    password_hash: data.password_hash.clone(),
                    display_name: data.display_name.clone(),
                    role: data.role,
                    status: UserStatus::Active,
                    token: None,
                    created_at: Utc::now(),
                    created_by: data.created_by,
                    updated_at: None,
                    updated_by: None,
                };
                debug!(user_id = %user.user_id, seq = user.seq, "Stored new user");
                Ok(slot.insert(user).clone())
            }
        }
    }

    async fn update_token(&self, user_id: &str, token: &str) -> AppResult<()> {
        self.modify(user_id, |u| u.token = Some(token.to_string()))
            .map(|_| ())
    }

    async fn update_password(&self, user_id: &str, password_hash: &str) -> AppResult<()> {
        self.modify(user_id, |u| {
            u.password_hash = password_hash.to_string();
            u.updated_by = Some(u.seq);
        })
        .map(|_| ())
    }

    async fn update_profile(&self, user_id: &str, display_name: Option<&str>) -> AppResult<User> {
        self.modify(user_id, |u| {
            u.display_name = display_name.map(String::from);
            u.updated_by = Some(u.seq);
        })
    }

    async fn update_status(&self, user_id: &str, status: UserStatus) -> AppResult<User> {
        self.modify(user_id, |u| u.status = status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokengate_core::error::ErrorKind;
    use tokengate_entity::user::UserRole;

    fn new_user(user_id: &str) -> NewUser {
        NewUser {
            user_id: user_id.to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            role: UserRole::User,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryUserStore::new();
        let created = store.create(&new_user("alice")).await.unwrap();
        assert_eq!(created.seq, 1);
        assert!(created.token.is_none());

        let found = store.find_by_user_id("alice").await.unwrap().unwrap();
        assert_eq!(found.user_id, "alice");
        assert!(store.find_by_user_id("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let store = MemoryUserStore::new();
        store.create(&new_user("alice")).await.unwrap();
        let err = store.create(&new_user("alice")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_token_overwrites() {
        let store = MemoryUserStore::new();
        store.create(&new_user("alice")).await.unwrap();
        store.update_token("alice", "first").await.unwrap();
        store.update_token("alice", "second").await.unwrap();

        let user = store.find_by_user_id("alice").await.unwrap().unwrap();
        assert_eq!(user.token.as_deref(), Some("second"));
        assert!(user.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryUserStore::new();
        let err = store.update_token("ghost", "t").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_seq() {
        let store = MemoryUserStore::new();
        for id in ["carol", "alice", "bob"] {
            store.create(&new_user(id)).await.unwrap();
        }
        let ids: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(ids, vec!["carol", "alice", "bob"]);
    }
}
