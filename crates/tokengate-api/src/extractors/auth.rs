//! `AuthUser` extractor: the principal attached by the authentication middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tokengate_auth::Principal;
use tokengate_core::error::AppError;

use crate::error::ApiError;

/// The authenticated caller, available in handlers behind the gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::authentication("Authentication required")))
    }
}
