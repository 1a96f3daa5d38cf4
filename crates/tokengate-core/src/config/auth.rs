//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound on `token_ttl_hours` (ten years).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign session tokens.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Lifetime of an issued token in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Request header that carries the token.
    #[serde(default = "default_token_header")]
    pub token_header: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Administrator account created at startup when missing.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the startup administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Login identifier.
    pub user_id: String,
    /// Initial password.
    #[serde(skip_serializing)]
    pub password: String,
}

impl AuthConfig {
    /// Creates a configuration with the given secret and default settings.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: default_token_ttl(),
            token_header: default_token_header(),
            password_min_length: default_password_min(),
            bootstrap_admin: None,
        }
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        if self.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must not exceed {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        if self.token_header.trim().is_empty() {
            return Err(AppError::configuration("auth.token_header must be set"));
        }
        Ok(())
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_token_header() -> String {
    "X-AUTH-TOKEN".to_string()
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.token_header, "X-AUTH-TOKEN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_ttl_bounds() {
        let mut config = AuthConfig::new("secret");
        config.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
        assert!(config.validate().is_ok());

        for hours in [0, MAX_TOKEN_TTL_HOURS + 1, 10_000_000_000, 3_000_000_000_000] {
            config.token_ttl_hours = hours;
            assert!(config.validate().is_err(), "ttl {hours}");
        }
    }
}
