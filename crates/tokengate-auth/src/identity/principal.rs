//! The authorization view of an account.

use serde::{Deserialize, Serialize};

use tokengate_entity::user::{User, UserRole, UserStatus};

/// What the rest of a request needs to know about the caller.
///
/// Derived from a [`User`] record; carries no credentials or token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Login identifier.
    pub user_id: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role loaded from the registry at request time.
    pub role: UserRole,
    /// Account may be used at all.
    pub enabled: bool,
    /// Account is temporarily locked.
    pub locked: bool,
}

impl Principal {
    /// Builds the principal view of a stored user.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            enabled: user.status != UserStatus::Inactive,
            locked: user.status == UserStatus::Locked,
        }
    }

    /// Enabled and not locked.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.locked
    }

    /// Whether the principal holds exactly `role`.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }
}
