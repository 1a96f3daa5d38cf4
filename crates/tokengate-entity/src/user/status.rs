//! Whether an account may be used.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state stored in the `status` column.
///
/// Only `Active` accounts sign in or authenticate; the other two differ only
/// in intent (`Inactive` is administrative, `Locked` is temporary).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Locked,
}

impl UserStatus {
    /// Sign-in is allowed only while active.
    pub fn can_login(&self) -> bool {
        *self == Self::Active
    }

    /// Column and wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
