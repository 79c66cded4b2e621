//! Task route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use backoffice_core::{Page, TaskId};

use super::dispatch;
use super::extract::{ApiJson, ApiPath, ApiQuery, FromQuery, QueryPairs};
use crate::api::AdminApi;
use crate::api::dto::TaskResponse;
use crate::error::ErrorResponse;
use crate::models::{NewTask, TaskChanges, TaskListParams};
use crate::state::AppState;

impl FromQuery for TaskListParams {
    fn from_query(query: &QueryPairs) -> Result<Self, String> {
        Ok(Self {
            page: query.page()?,
            status: query.all("status")?,
            priority: query.all("priority")?,
            label: query.all("label")?,
            filter: query.text("filter"),
        })
    }
}

/// `GET /tasks`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TaskListParams>,
) -> Result<Json<Page<TaskResponse>>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().list_tasks(&ctx, params))
        .await
        .map(Json)
}

/// `POST /tasks`
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewTask>,
) -> Result<(StatusCode, Json<TaskResponse>), ErrorResponse> {
    let ctx = state.request_context();
    let task = dispatch(&state, &ctx, state.api().create_task(&ctx, input)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/{task_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TaskId>,
) -> Result<Json<TaskResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().get_task(&ctx, id))
        .await
        .map(Json)
}

/// `PUT /tasks/{task_id}`
#[instrument(skip(state, changes))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TaskId>,
    ApiJson(changes): ApiJson<TaskChanges>,
) -> Result<Json<TaskResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().update_task(&ctx, id, changes))
        .await
        .map(Json)
}

/// `DELETE /tasks/{task_id}`
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TaskId>,
) -> Result<StatusCode, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().delete_task(&ctx, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{TaskLabel, TaskPriority, TaskStatus};

    use super::*;

    #[test]
    fn test_list_params_from_query() {
        let query = QueryPairs::parse(
            "status=in%20progress&status=todo&priority=high,critical&label=bug&filter=TASK-00",
        );
        let params = TaskListParams::from_query(&query).unwrap();
        assert_eq!(params.status, [TaskStatus::InProgress, TaskStatus::Todo]);
        assert_eq!(params.priority, [TaskPriority::High, TaskPriority::Critical]);
        assert_eq!(params.label, [TaskLabel::Bug]);
        assert_eq!(params.filter.as_deref(), Some("TASK-00"));
    }

    #[test]
    fn test_underscore_status_is_rejected() {
        let err = TaskListParams::from_query(&QueryPairs::parse("status=in_progress")).unwrap_err();
        assert_eq!(err, "status: invalid task status: in_progress");
    }
}
