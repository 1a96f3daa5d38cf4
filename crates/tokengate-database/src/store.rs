//! Storage seam for user records.

use async_trait::async_trait;

use tokengate_core::result::AppResult;
use tokengate_entity::user::{NewUser, User, UserStatus};

/// Persistence operations the authentication layer needs.
///
/// `update_token` is a blind overwrite: concurrent sign-ins for the same
/// identity race and whichever write lands last becomes the current token.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by login identifier.
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<User>>;

    /// List every user, oldest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a new user. Fails with `Conflict` if the identifier is taken.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Replace the stored current token.
    async fn update_token(&self, user_id: &str, token: &str) -> AppResult<()>;

    /// Replace the stored password hash.
    async fn update_password(&self, user_id: &str, password_hash: &str) -> AppResult<()>;

    /// Replace the display name.
    async fn update_profile(&self, user_id: &str, display_name: Option<&str>) -> AppResult<User>;

    /// Change the account status.
    async fn update_status(&self, user_id: &str, status: UserStatus) -> AppResult<User>;
}
