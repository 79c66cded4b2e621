//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bo-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migrations live in `crates/api/migrations/` and are embedded in the
//! `backoffice-api` library at build time.

use backoffice_api::db;

use super::{CommandError, connect};

/// Apply every pending migration.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running backoffice migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Backoffice migrations complete!");
    Ok(())
}
