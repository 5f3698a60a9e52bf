//! Embedded schema migrations applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task did not complete.
    #[error("migration task aborted: {message}")]
    Task { message: String },
}

/// Apply pending migrations on a dedicated synchronous connection.
///
/// Diesel's migration harness is blocking, so the work runs on Tokio's
/// blocking pool.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_migrations(&url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations applied");
    Ok(applied)
}

fn apply_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let versions = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(versions.len())
}
