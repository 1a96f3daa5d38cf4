//! Sign-up and sign-in handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tokengate_auth::NewAccount;
use tokengate_entity::user::UserRole;

use crate::dto::request::{SignInRequest, SignUpRequest};
use crate::dto::response::{ApiResponse, SignInResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /sign-up
///
/// Self-registration always creates a `USER` account.
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .session_manager
        .register(NewAccount {
            user_id: req.user_id,
            password: req.password,
            display_name: req.display_name,
            role: UserRole::User,
            created_by: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<ApiResponse<SignInResponse>>> {
    let result = state
        .session_manager
        .sign_in(&req.user_id, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(SignInResponse {
        token: result.token,
        user_id: result.user.user_id,
        role: result.user.role,
    })))
}
