//! Task repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use backoffice_core::{Page, TaskId, TaskLabel, TaskPriority, TaskStatus};

use super::RepositoryError;
use super::listing::{Filter, ListQuery, fetch_page};
use crate::models::{NewTask, Task, TaskChanges, TaskListParams};

const COLUMNS: &str = "id, title, status, label, priority, assignee, description, \
                       due_date, created_at, updated_at";

const LIST: ListQuery = ListQuery {
    columns: COLUMNS,
    table: "tasks",
    order_by: "created_at DESC, id DESC",
};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` task queries.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: String,
    title: String,
    status: TaskStatus,
    label: TaskLabel,
    priority: TaskPriority,
    assignee: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        if !row.id.starts_with(TaskId::PREFIX) {
            return Err(RepositoryError::DataCorruption(format!(
                "invalid task id in database: {}",
                row.id
            )));
        }

        Ok(Self {
            id: TaskId::new(row.id),
            title: row.title,
            status: row.status,
            label: row.label,
            priority: row.priority,
            assignee: row.assignee,
            description: row.description,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for task database operations.
pub struct TaskRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskRepository<'a> {
    /// Create a new task repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List tasks matching `params`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self, params: &TaskListParams) -> Result<Page<Task>, RepositoryError> {
        let status: Vec<&str> = params.status.iter().map(TaskStatus::as_str).collect();
        let priority: Vec<&str> = params.priority.iter().map(TaskPriority::as_str).collect();
        let label: Vec<&str> = params.label.iter().map(TaskLabel::as_str).collect();

        let filter = Filter::new()
            .any_of("status", &status)
            .any_of("priority", &priority)
            .any_of("label", &label)
            .contains(&["title", "id"], params.filter.as_deref());

        let (rows, total) =
            fetch_page::<TaskRow>(self.pool, &LIST, None, &filter, params.page).await?;
        let data = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Task>, _>>()?;

        Ok(Page::new(data, params.page, total))
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Reserve the next task identifier from `task_number_seq`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn next_id(&self) -> Result<TaskId, RepositoryError> {
        let number: i64 = sqlx::query_scalar("SELECT nextval('task_number_seq')")
            .fetch_one(self.pool)
            .await?;

        Ok(TaskId::from_sequence(number))
    }

    /// Insert a task under a previously reserved ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is already used.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, id: &TaskId, input: &NewTask) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r"
            INSERT INTO tasks (id, title, status, label, priority, assignee, description, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "
        ))
        .bind(id.as_str())
        .bind(&input.title)
        .bind(input.status)
        .bind(input.label)
        .bind(input.priority)
        .bind(input.assignee.as_deref().unwrap_or_default())
        .bind(input.description.as_deref().unwrap_or_default())
        .bind(input.due_date)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    /// Apply the present fields of `changes` and return the updated row.
    ///
    /// With no changes this is a plain read. Returns `Ok(None)` if the task
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: &TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, RepositoryError> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let row = update_query(id, changes)
            .build_query_as::<TaskRow>()
            .fetch_optional(self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row was deleted.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &TaskId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn update_query<'args>(id: &TaskId, changes: &TaskChanges) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE tasks SET ");
    let mut set = qb.separated(", ");
    if let Some(title) = &changes.title {
        set.push("title = ").push_bind_unseparated(title.clone());
    }
    if let Some(status) = changes.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(label) = changes.label {
        set.push("label = ").push_bind_unseparated(label);
    }
    if let Some(priority) = changes.priority {
        set.push("priority = ").push_bind_unseparated(priority);
    }
    if let Some(assignee) = &changes.assignee {
        set.push("assignee = ").push_bind_unseparated(assignee.clone());
    }
    if let Some(description) = &changes.description {
        set.push("description = ").push_bind_unseparated(description.clone());
    }
    if let Some(due_date) = changes.due_date {
        set.push("due_date = ").push_bind_unseparated(due_date);
    }
    qb.push(" WHERE id = ")
        .push_bind(id.as_str().to_owned())
        .push(" RETURNING ")
        .push(COLUMNS);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_query_sets_only_present_fields() {
        let changes = TaskChanges {
            title: Some("Renamed".to_owned()),
            priority: Some(TaskPriority::High),
            ..TaskChanges::default()
        };
        let qb = update_query(&TaskId::from_sequence(3), &changes);
        assert_eq!(
            qb.sql(),
            format!("UPDATE tasks SET title = $1, priority = $2 WHERE id = $3 RETURNING {COLUMNS}")
        );
    }
}
