//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use backoffice_core::{Email, Page, UserId, UserRole, UserStatus};

use super::RepositoryError;
use super::listing::{Filter, ListQuery, fetch_page};
use crate::models::{User, UserChanges, UserListParams};

const COLUMNS: &str = "id, first_name, last_name, username, email, phone_number, \
                       status, role, created_at, updated_at";

const LIST: ListQuery = ListQuery {
    columns: COLUMNS,
    table: "users",
    order_by: "created_at DESC, id",
};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    phone_number: String,
    status: UserStatus,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email,
            phone_number: row.phone_number,
            status: row.status,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row joined with the stored password hash, used only by login.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// A user together with the PHC string of their password.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Everything needed to insert a user row.
#[derive(Debug, Clone)]
pub struct UserRecord<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub phone_number: &'a str,
    pub status: UserStatus,
    pub role: UserRole,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List users matching `params`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self, params: &UserListParams) -> Result<Page<User>, RepositoryError> {
        let status: Vec<&str> = params.status.iter().map(UserStatus::as_str).collect();
        let role: Vec<&str> = params.role.iter().map(UserRole::as_str).collect();

        let filter = Filter::new()
            .any_of("status", &status)
            .any_of("role", &role)
            .contains(&["username"], params.username.as_deref());

        let (rows, total) =
            fetch_page::<UserRow>(self.pool, &LIST, None, &filter, params.page).await?;
        let data = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<User>, _>>()?;

        Ok(Page::new(data, params.page, total))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "SELECT {COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|row| {
            Ok(UserCredentials {
                user: row.user.try_into()?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` with the constraint name if the
    /// email or username is already taken.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, record: &UserRecord<'_>) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            INSERT INTO users (first_name, last_name, username, email, password_hash,
                               phone_number, status, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "
        ))
        .bind(record.first_name)
        .bind(record.last_name)
        .bind(record.username)
        .bind(record.email.as_str())
        .bind(record.password_hash)
        .bind(record.phone_number)
        .bind(record.status)
        .bind(record.role)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    /// Apply the present fields of `changes` and return the updated row.
    ///
    /// With no changes this is a plain read. Returns `Ok(None)` if the user
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email collides.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let row = update_query(id, changes)
            .build_query_as::<UserRow>()
            .fetch_optional(self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row was deleted.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Build `UPDATE users SET ... WHERE id = $n RETURNING ...` for the present fields.
fn update_query<'args>(id: UserId, changes: &UserChanges) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE users SET ");
    let mut set = qb.separated(", ");
    if let Some(first_name) = &changes.first_name {
        set.push("first_name = ").push_bind_unseparated(first_name.clone());
    }
    if let Some(last_name) = &changes.last_name {
        set.push("last_name = ").push_bind_unseparated(last_name.clone());
    }
    if let Some(email) = &changes.email {
        set.push("email = ").push_bind_unseparated(email.as_str().to_owned());
    }
    if let Some(phone_number) = &changes.phone_number {
        set.push("phone_number = ").push_bind_unseparated(phone_number.clone());
    }
    if let Some(status) = changes.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(role) = changes.role {
        set.push("role = ").push_bind_unseparated(role);
    }
    qb.push(" WHERE id = ")
        .push_bind(id.as_uuid())
        .push(" RETURNING ")
        .push(COLUMNS);
    qb
}
