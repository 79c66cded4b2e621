//! CLI command implementations.

pub mod migrate;
pub mod seed;

use backoffice_api::db::{self, RepositoryError};
use backoffice_api::services::ServiceError;
use backoffice_core::EmailError;
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A seed email is malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// `BACKOFFICE_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("BACKOFFICE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("BACKOFFICE_DATABASE_URL"))
}

/// Connect to the backoffice database.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to backoffice database...");
    Ok(db::create_pool(&database_url).await?)
}
