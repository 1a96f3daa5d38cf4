//! Admin user management handlers.
//!
//! Every route under `/admin` is restricted to `ADMIN` by the access rules
//! before these handlers run.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tokengate_auth::NewAccount;

use crate::dto::request::{ChangeStatusRequest, CreateUserRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.session_manager.list_users().await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let admin = state.session_manager.require_user(&auth.user_id).await?;
    let user = state
        .session_manager
        .register(NewAccount {
            user_id: req.user_id,
            password: req.password,
            display_name: req.display_name,
            role: req.role,
            created_by: Some(admin.seq),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// PUT /admin/users/{user_id}/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ChangeStatusRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .session_manager
        .set_status(&user_id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
