//! Password policy for new passwords.

use tokengate_core::config::AuthConfig;
use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;

/// Upper bound that keeps hashing cost predictable.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validates candidate passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator with an explicit minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Creates a validator from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.password_min_length)
    }

    /// Checks length bounds and rejects whitespace-only passwords.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }
        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> AppResult<()> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        let validator = PasswordValidator::new(8);
        assert!(validator.validate("short").is_err());
        assert!(validator.validate("long enough").is_ok());
        assert!(validator.validate(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_blank_rejected() {
        assert!(PasswordValidator::new(4).validate("        ").is_err());
    }

    #[test]
    fn test_not_same() {
        let validator = PasswordValidator::new(8);
        assert!(validator.validate_not_same("abcdefgh", "abcdefgh").is_err());
        assert!(validator.validate_not_same("abcdefgh", "hgfedcba").is_ok());
    }
}
