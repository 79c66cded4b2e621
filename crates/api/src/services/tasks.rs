//! Task service.

use sqlx::PgPool;
use tracing::instrument;

use backoffice_core::{Page, TaskId};

use super::{RequestContext, ServiceError};
use crate::db::TaskRepository;
use crate::models::{NewTask, Task, TaskChanges, TaskListParams};

/// Lists, creates, updates and deletes tasks.
#[derive(Debug, Clone)]
pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repo(&self) -> TaskRepository<'_> {
        TaskRepository::new(&self.pool)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on store failure.
    #[instrument(skip(self, ctx))]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        params: &TaskListParams,
    ) -> Result<Page<Task>, ServiceError> {
        ctx.ensure_active()?;
        Ok(self.repo().list(params).await?)
    }

    /// Create a task under the next `TASK-nnnn` identifier.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::BadRequest` for a blank title, or
    /// `ServiceError::Repository` on store failure.
    #[instrument(skip(self, ctx, input))]
    pub async fn create(&self, ctx: &RequestContext, input: &NewTask) -> Result<Task, ServiceError> {
        ctx.ensure_active()?;
        if is_blank(&input.title) {
            return Err(blank_title());
        }

        let repo = self.repo();
        let id = repo.next_id().await?;
        let task = repo.create(&id, input).await?;
        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::TaskNotFound` if no task has this ID.
    #[instrument(skip(self, ctx), fields(task_id = %id))]
    pub async fn get(&self, ctx: &RequestContext, id: &TaskId) -> Result<Task, ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::TaskNotFound)
    }

    /// Apply the fields present in `changes`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::BadRequest` for a blank title, or
    /// `ServiceError::TaskNotFound` if no task has this ID.
    #[instrument(skip(self, ctx, changes), fields(task_id = %id))]
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &TaskId,
        changes: &TaskChanges,
    ) -> Result<Task, ServiceError> {
        ctx.ensure_active()?;
        if changes.title.as_deref().is_some_and(is_blank) {
            return Err(blank_title());
        }
        self.repo()
            .update(id, changes)
            .await?
            .ok_or(ServiceError::TaskNotFound)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::TaskNotFound` if no row was deleted.
    #[instrument(skip(self, ctx), fields(task_id = %id))]
    pub async fn delete(&self, ctx: &RequestContext, id: &TaskId) -> Result<(), ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, ServiceError::TaskNotFound))?;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}

fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}

fn blank_title() -> ServiceError {
    ServiceError::BadRequest("title must not be empty".to_owned())
}
