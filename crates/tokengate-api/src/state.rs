//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use axum::http::HeaderName;

use tokengate_auth::{
    AccessRules, AuthenticationGate, PasswordHasher, PasswordValidator, SessionManager,
    SingleSessionPolicy, StoreIdentityResolver, TokenCodec,
};
use tokengate_core::config::AppConfig;
use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_database::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User registry
    pub store: Arc<dyn UserStore>,
    /// Token issuance and validation
    pub codec: Arc<TokenCodec>,
    /// Account lifecycle
    pub session_manager: Arc<SessionManager>,
    /// Per-request authentication and access rules
    pub gate: Arc<AuthenticationGate>,
    /// Header carrying the session token
    pub token_header: HeaderName,
}

impl AppState {
    /// Wires every service over `store` using the default access rules.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<Self> {
        Self::with_rules(config, store, AccessRules::defaults()?)
    }

    /// Wires every service over `store` with custom access rules.
    pub fn with_rules(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        rules: AccessRules,
    ) -> AppResult<Self> {
        let token_header = HeaderName::try_from(config.auth.token_header.as_str())
            .map_err(|e| {
                AppError::configuration(format!(
                    "auth.token_header '{}' is not a valid header name: {e}",
                    config.auth.token_header
                ))
            })?;

        let codec = Arc::new(TokenCodec::from_config(&config.auth)?);

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&store),
            Arc::clone(&codec),
            Arc::new(PasswordHasher::new()),
            PasswordValidator::from_config(&config.auth),
        ));

        let gate = Arc::new(AuthenticationGate::new(
            SingleSessionPolicy::new(Arc::clone(&codec), Arc::clone(&store)),
            Arc::clone(&codec),
            Arc::new(StoreIdentityResolver::new(Arc::clone(&store))),
            rules,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            codec,
            session_manager,
            gate,
            token_header,
        })
    }
}
