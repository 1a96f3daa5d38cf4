//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tokengate_entity::user::{UserRole, UserStatus};

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Login identifier.
    #[validate(length(min = 1, max = 30, message = "User id must be 1-30 characters"))]
    pub user_id: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 30))]
    pub display_name: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Login identifier.
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name; absent or blank clears it.
    #[validate(length(max = 30))]
    pub display_name: Option<String>,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login identifier.
    #[validate(length(min = 1, max = 30))]
    pub user_id: String,
    /// Initial password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 30))]
    pub display_name: Option<String>,
    /// Role; defaults to `USER`.
    #[serde(default)]
    pub role: UserRole,
}

/// Change account status request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeStatusRequest {
    /// New status.
    pub status: UserStatus,
}
