//! Detection of superseded session tokens.

use std::sync::Arc;

use tracing::{debug, warn};

use tokengate_core::result::AppResult;
use tokengate_database::UserStore;

use crate::jwt::{InvalidReason, TokenCodec};

/// What the policy made of an inbound token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedToken {
    /// Matches the registry's current token; passed through unchanged.
    Current(String),
    /// Subject has no registry record; passed through for the gate to decide.
    Unregistered(String),
    /// A newer sign-in replaced this token. Holds an already-expired stand-in.
    Superseded(String),
    /// Subject could not be read from the token.
    Undecodable(InvalidReason),
}

impl ResolvedToken {
    /// The token downstream validation should see, if any.
    pub fn effective_token(&self) -> Option<&str> {
        match self {
            Self::Current(token) | Self::Unregistered(token) | Self::Superseded(token) => {
                Some(token)
            }
            Self::Undecodable(_) => None,
        }
    }

    /// Whether a newer session replaced this one.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded(_))
    }
}

/// Enforces one live session per account.
///
/// A token is live only while it is byte-for-byte equal to the token stored
/// on the account. Staleness is detected lazily when an old token is next
/// presented; there is no revocation list.
#[derive(Debug, Clone)]
pub struct SingleSessionPolicy {
    codec: Arc<TokenCodec>,
    store: Arc<dyn UserStore>,
}

impl SingleSessionPolicy {
    /// Creates a policy over the given codec and user store.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn UserStore>) -> Self {
        Self { codec, store }
    }

    /// Resolves an inbound token against the registry.
    ///
    /// Decode failures are absorbed into [`ResolvedToken::Undecodable`];
    /// only storage and encoding failures are returned as errors.
    pub async fn resolve(&self, token: &str) -> AppResult<ResolvedToken> {
        let subject = match self.codec.decode_subject(token) {
            Ok(subject) => subject,
            Err(reason) => {
                debug!(%reason, "Inbound token could not be decoded");
                return Ok(ResolvedToken::Undecodable(reason));
            }
        };

        let Some(user) = self.store.find_by_user_id(&subject).await? else {
            debug!(subject = %subject, "Token subject has no registry record");
            return Ok(ResolvedToken::Unregistered(token.to_string()));
        };

        if user.is_current_token(token) {
            return Ok(ResolvedToken::Current(token.to_string()));
        }

        warn!(
            user_id = %user.user_id,
            "Token superseded by a newer sign-in"
        );
        let replacement = self.codec.issue_expired(&user.user_id, user.role)?;
        Ok(ResolvedToken::Superseded(replacement))
    }
}
