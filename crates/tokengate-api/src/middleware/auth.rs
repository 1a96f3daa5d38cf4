//! Token authentication middleware.
//!
//! Runs the [`AuthenticationGate`](tokengate_auth::AuthenticationGate) on
//! every request, applies the path rules, and attaches the authenticated
//! [`Principal`](tokengate_auth::Principal) to the request extensions for
//! the `AuthUser` extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use tokengate_auth::{AccessDecision, GateOutcome};
use tokengate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticates the request and enforces the access rules.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    // Unreadable header values count as no credential.
    let header = request
        .headers()
        .get(&state.token_header)
        .and_then(|v| v.to_str().ok());

    let outcome = match state.gate.authenticate(header).await {
        Ok(outcome) => outcome,
        Err(err) => return ApiError(err).into_response(),
    };

    let decision = state
        .gate
        .authorize(request.method().as_str(), request.uri().path(), &outcome);

    match decision {
        AccessDecision::Allow => {
            if let Some(principal) = outcome.into_principal() {
                request.extensions_mut().insert(principal);
            }
            next.run(request).await
        }
        AccessDecision::Unauthenticated => {
            let message = match outcome {
                GateOutcome::Rejected(reason) => format!("Authentication required: {reason}"),
                _ => "Authentication required".to_string(),
            };
            ApiError(AppError::authentication(message)).into_response()
        }
        AccessDecision::Forbidden => {
            ApiError(AppError::authorization("Insufficient role for this resource")).into_response()
        }
    }
}
