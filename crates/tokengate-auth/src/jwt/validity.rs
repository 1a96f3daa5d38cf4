//! Outcome of validating a token.

use thiserror::Error;

use tokengate_core::error::AppError;

use super::claims::Claims;

/// Why a token failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Not a well-formed signed token.
    #[error("token is malformed")]
    Malformed,
    /// The signature was not produced with the current secret.
    #[error("token signature does not match")]
    SignatureMismatch,
    /// Signature verifies but the expiry instant has passed.
    #[error("token has expired")]
    Expired,
}

impl From<InvalidReason> for AppError {
    fn from(reason: InvalidReason) -> Self {
        AppError::authentication(format!("Invalid token: {reason}"))
    }
}

/// Result of a full validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidity {
    /// Signature verifies and the token has not expired.
    Valid(Claims),
    /// The token must not authenticate anyone.
    Invalid(InvalidReason),
}

impl TokenValidity {
    /// Whether the token may authenticate a request.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The verified claims, if valid.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Valid(claims) => Some(claims),
            Self::Invalid(_) => None,
        }
    }

    /// The failure reason, if invalid.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }
}
