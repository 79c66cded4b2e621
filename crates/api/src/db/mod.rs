//! Database operations for the backoffice `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `users` - Backoffice accounts (unique email and username)
//! - `tasks` - Work items keyed `TASK-nnnn`, numbered by `task_number_seq`
//! - `apps` - Integration catalogue with a connected flag
//! - `chat_conversations` - Conversations shown in the inbox
//! - `chat_messages` - Messages owned by a conversation (cascade delete)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p backoffice-cli -- migrate
//! ```

pub mod apps;
pub mod chats;
pub mod listing;
pub mod tasks;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use apps::AppRepository;
pub use chats::ChatRepository;
pub use listing::Filter;
pub use tasks::TaskRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation, carrying the constraint name.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify a write error, turning unique violations into [`RepositoryError::Conflict`].
    pub(crate) fn from_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            let constraint = db_err.constraint().unwrap_or("unique").to_owned();
            return Self::Conflict(constraint);
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply every pending migration in `crates/api/migrations`.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails or the applied
/// history no longer matches the files on disk.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
