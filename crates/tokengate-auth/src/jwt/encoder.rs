//! Token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_entity::user::UserRole;

use super::claims::Claims;
use super::secret::SigningSecret;

/// How far in the past a deliberately expired token's expiry is placed.
const EXPIRED_OFFSET_HOURS: i64 = 1;

/// Creates HS256-signed tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder signing with the given secret.
    pub fn new(secret: &SigningSecret) -> AppResult<Self> {
        Ok(Self {
            encoding_key: secret.encoding_key()?,
        })
    }

    /// Issues a token valid from now for `lifetime`.
    pub fn issue(&self, subject: &str, role: UserRole, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Token lifetime overflows the clock"))?;
        self.sign(subject, role, now, expires_at)
    }

    /// Issues a token whose expiry is one hour before now.
    ///
    /// Never authenticates; stands in for a superseded session's token.
    pub fn issue_expired(&self, subject: &str, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        self.sign(
            subject,
            role,
            now,
            now - Duration::hours(EXPIRED_OFFSET_HOURS),
        )
    }

    fn sign(
        &self,
        subject: &str,
        role: UserRole,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let claims = Claims::new(subject, role, issued_at, expires_at);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
