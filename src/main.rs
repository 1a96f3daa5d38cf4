//! Tokengate server: token authentication with one live session per account.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use tokengate_api::AppState;
use tokengate_core::config::AppConfig;
use tokengate_core::result::AppResult;
use tokengate_database::{DatabasePool, MemoryUserStore, UserRepository, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("TOKENGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Starting Tokengate v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect storage, wire services, and serve until shutdown.
async fn run(config: AppConfig) -> AppResult<()> {
    let (store, pool): (Arc<dyn UserStore>, Option<DatabasePool>) = if config.database.in_memory {
        tracing::warn!("Using in-memory user store; accounts are lost on restart");
        (Arc::new(MemoryUserStore::new()), None)
    } else {
        let pool = DatabasePool::connect(&config.database).await?;
        pool.health_check().await?;
        tokengate_database::migration::run_migrations(pool.pool()).await?;
        (Arc::new(UserRepository::new(pool.pool().clone())), Some(pool))
    };

    let state = AppState::new(config, store)?;
    let result = tokengate_api::run_server(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}
