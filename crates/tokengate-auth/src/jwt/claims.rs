//! Claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tokengate_entity::user::UserRole;

/// JWT claims payload.
///
/// `roles` always holds exactly one entry, the role name at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's login identifier.
    pub sub: String,
    /// Role names granted at issuance.
    pub roles: Vec<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Build the claim set for `subject` valid from `issued_at` until `expires_at`.
    pub fn new(
        subject: &str,
        role: UserRole,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            roles: vec![role.as_str().to_string()],
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the subject claim.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Parses the first role claim, if it names a known role.
    pub fn role(&self) -> Option<UserRole> {
        self.roles.first().and_then(|r| r.parse().ok())
    }
}
