//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;
use super::status::UserStatus;

/// A registered account, one row per identity.
///
/// `token` holds the serialized session token issued at the most recent
/// sign-in. Only that exact string is accepted as the live session; issuing
/// a new one overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Surrogate key.
    pub seq: i64,
    /// Unique login identifier, immutable after creation.
    pub user_id: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Authorization role.
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// Most recently issued session token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// Account that registered this one, if any.
    pub created_by: Option<i64>,
    /// When the record was last modified.
    pub updated_at: Option<DateTime<Utc>>,
    /// Account that last modified this one, if any.
    pub updated_by: Option<i64>,
}

impl User {
    /// Byte-for-byte comparison against the stored current token.
    ///
    /// An empty candidate never matches, nor does anything when no token
    /// has been issued yet.
    pub fn is_current_token(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.token.as_deref() == Some(token)
    }

    /// Check if the user can sign in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Desired login identifier.
    pub user_id: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Registering account's key (optional).
    pub created_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_token(token: Option<&str>) -> User {
        User {
            seq: 1,
            user_id: "alice".to_string(),
            password_hash: "hash".to_string(),
            display_name: Some("Alice".to_string()),
            role: UserRole::User,
            status: UserStatus::Active,
            token: token.map(String::from),
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
        }
    }

    #[test]
    fn test_current_token_exact_match() {
        let user = user_with_token(Some("aaa.bbb.ccc"));
        assert!(user.is_current_token("aaa.bbb.ccc"));
        assert!(!user.is_current_token("aaa.bbb.ccd"));
    }

    #[test]
    fn test_empty_token_never_current() {
        assert!(!user_with_token(Some("")).is_current_token(""));
        assert!(!user_with_token(None).is_current_token(""));
        assert!(!user_with_token(None).is_current_token("aaa.bbb.ccc"));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let json = serde_json::to_value(user_with_token(Some("t"))).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("token").is_none());
        assert_eq!(json["role"], "USER");
    }
}
