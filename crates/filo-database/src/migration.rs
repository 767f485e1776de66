//! Embedded schema migrations for the `files` table.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use filo_core::error::{AppError, ErrorKind};

/// Migrations compiled into the binary from `migrations/` at the workspace root.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known_migrations = known, "Applying file registry schema");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply schema migrations: {e}"),
            e,
        )
    })?;

    info!("File registry schema is up to date");
    Ok(())
}
