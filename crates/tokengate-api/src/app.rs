//! Application builder and server loop.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use tokengate_core::config::AppConfig;
use tokengate_core::error::{AppError, ErrorKind};
use tokengate_core::result::AppResult;
use tokengate_database::UserStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over `store`.
pub fn build_app(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<Router> {
    let state = AppState::new(config, store)?;
    Ok(build_router(state))
}

/// Creates the configured administrator account if it does not exist yet.
pub async fn bootstrap(state: &AppState) -> AppResult<()> {
    if let Some(admin) = &state.config.auth.bootstrap_admin {
        let created = state
            .session_manager
            .ensure_admin(&admin.user_id, &admin.password)
            .await?;
        if created {
            info!(user_id = %admin.user_id, "Bootstrap administrator created");
        }
    }
    Ok(())
}

/// Serves the application until the process receives Ctrl-C.
pub async fn run_server(state: AppState) -> AppResult<()> {
    bootstrap(&state).await?;

    let address = state.config.server.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {address}"), e)
    })?;

    info!(address = %address, "Tokengate listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
