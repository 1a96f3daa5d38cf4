//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use tokengate_core::error::{AppError, ErrorKind};
use tokengate_core::result::AppResult;

/// Migrations under `migrations/` at the workspace root, embedded at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration to the given pool.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying database migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Database schema is up to date");
    Ok(())
}
