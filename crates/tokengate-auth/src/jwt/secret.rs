//! Process-wide signing secret.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};

use tokengate_core::config::AuthConfig;
use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;

/// The HMAC secret, base64-encoded once at startup and immutable afterwards.
#[derive(Clone)]
pub struct SigningSecret {
    encoded: String,
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("encoded", &"<redacted>")
            .finish()
    }
}

impl SigningSecret {
    /// Encodes a raw secret string.
    pub fn new(raw: &str) -> AppResult<Self> {
        if raw.is_empty() {
            return Err(AppError::configuration("JWT secret must not be empty"));
        }
        Ok(Self {
            encoded: STANDARD.encode(raw.as_bytes()),
        })
    }

    /// Reads the secret from auth configuration.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        Self::new(&config.jwt_secret)
    }

    /// Key used to sign tokens.
    pub fn encoding_key(&self) -> AppResult<EncodingKey> {
        EncodingKey::from_base64_secret(&self.encoded)
            .map_err(|e| AppError::configuration(format!("Invalid signing secret: {e}")))
    }

    /// Key used to verify token signatures.
    pub fn decoding_key(&self) -> AppResult<DecodingKey> {
        DecodingKey::from_base64_secret(&self.encoded)
            .map_err(|e| AppError::configuration(format!("Invalid signing secret: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(SigningSecret::new("").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let secret = SigningSecret::new("hunter2").unwrap();
        let shown = format!("{secret:?}");
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains(&STANDARD.encode("hunter2")));
    }
}
