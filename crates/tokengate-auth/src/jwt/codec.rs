//! The token codec: one secret, one encoder, one decoder.

use chrono::Duration;

use tokengate_core::config::AuthConfig;
use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_entity::user::UserRole;

use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;
use super::secret::SigningSecret;
use super::validity::{InvalidReason, TokenValidity};

/// Issues and verifies session tokens.
///
/// Built once at startup from an immutable [`SigningSecret`]; cheap to clone
/// and safe to share across request tasks.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    session_ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec from a prepared secret and the lifetime of sign-in tokens.
    pub fn new(secret: &SigningSecret, session_ttl: Duration) -> AppResult<Self> {
        if session_ttl <= Duration::zero() {
            return Err(AppError::configuration("Token lifetime must be positive"));
        }
        Ok(Self {
            encoder: JwtEncoder::new(secret)?,
            decoder: JwtDecoder::new(secret)?,
            session_ttl,
        })
    }

    /// Creates a codec from auth configuration.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let secret = SigningSecret::from_config(config)?;
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| AppError::configuration("auth.token_ttl_hours is out of range"))?;
        Self::new(&secret, ttl)
    }

    /// Lifetime applied by [`issue_session`](Self::issue_session).
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Issues a token for `subject` expiring `lifetime` from now.
    pub fn issue(&self, subject: &str, role: UserRole, lifetime: Duration) -> AppResult<String> {
        self.encoder.issue(subject, role, lifetime)
    }

    /// Issues a sign-in token with the configured lifetime.
    pub fn issue_session(&self, subject: &str, role: UserRole) -> AppResult<String> {
        self.encoder.issue(subject, role, self.session_ttl)
    }

    /// Issues a token that is already expired.
    pub fn issue_expired(&self, subject: &str, role: UserRole) -> AppResult<String> {
        self.encoder.issue_expired(subject, role)
    }

    /// Verifies the signature and returns the subject claim.
    pub fn decode_subject(&self, token: &str) -> Result<String, InvalidReason> {
        self.decoder.decode_subject(token)
    }

    /// Full check of signature, structure, and expiry.
    pub fn validate(&self, token: &str) -> TokenValidity {
        self.decoder.validate(token)
    }

    /// `true` iff the token parses, verifies, and has not expired.
    pub fn is_valid(&self, token: &str) -> bool {
        self.validate(token).is_valid()
    }
}
