//! App integration repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use backoffice_core::{AppId, Page};

use super::RepositoryError;
use super::listing::{Filter, ListQuery, fetch_page};
use crate::models::{App, AppListParams};

const COLUMNS: &str = "id, name, description, logo, connected, created_at, updated_at";

const LIST: ListQuery = ListQuery {
    columns: COLUMNS,
    table: "apps",
    order_by: "id",
};

/// Internal row type for `PostgreSQL` app queries.
#[derive(Debug, sqlx::FromRow)]
struct AppRow {
    id: String,
    name: String,
    description: String,
    logo: String,
    connected: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId::new(row.id),
            name: row.name,
            description: row.description,
            logo: row.logo,
            connected: row.connected,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row values for seeding an app.
#[derive(Debug, Clone, Copy)]
pub struct AppSeed<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub logo: &'a str,
    pub connected: bool,
}

/// Repository for app database operations.
pub struct AppRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppRepository<'a> {
    /// Create a new app repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List apps matching `params`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list(&self, params: &AppListParams) -> Result<Page<App>, RepositoryError> {
        let filter = Filter::new()
            .equals("connected", params.connection.connected())
            .contains(&["name"], params.filter.as_deref());

        let order_by = params.sort.map(|dir| format!("name {}, id", dir.as_sql()));

        let (rows, total) =
            fetch_page::<AppRow>(self.pool, &LIST, order_by.as_deref(), &filter, params.page)
                .await?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            params.page,
            total,
        ))
    }

    /// Set the `connected` flag of an app and return the updated row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the app does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_connected(&self, id: &AppId, connected: bool) -> Result<App, RepositoryError> {
        let row = sqlx::query_as::<_, AppRow>(&format!(
            "UPDATE apps SET connected = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.as_str())
        .bind(connected)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Insert an app, or refresh its catalogue fields if it already exists.
    ///
    /// The `connected` flag of an existing app is left as is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, seed: &AppSeed<'_>) -> Result<App, RepositoryError> {
        let row = sqlx::query_as::<_, AppRow>(&format!(
            r"
            INSERT INTO apps (id, name, description, logo, connected)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    description = EXCLUDED.description,
                    logo = EXCLUDED.logo
            RETURNING {COLUMNS}
            "
        ))
        .bind(seed.id)
        .bind(seed.name)
        .bind(seed.description)
        .bind(seed.logo)
        .bind(seed.connected)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
