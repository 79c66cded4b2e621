//! Task domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use backoffice_core::{PageRequest, TaskId, TaskLabel, TaskPriority, TaskStatus};

/// A task (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub label: TaskLabel,
    pub priority: TaskPriority,
    /// Empty when absent.
    pub assignee: String,
    /// Empty when absent.
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a task. The identifier is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub label: TaskLabel,
    pub priority: TaskPriority,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update of a task. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub label: Option<TaskLabel>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.label.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
    }
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListParams {
    pub page: PageRequest,
    pub status: Vec<TaskStatus>,
    pub priority: Vec<TaskPriority>,
    pub label: Vec<TaskLabel>,
    /// Case-insensitive substring of the title or the task ID.
    pub filter: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_parses_wire_labels() {
        let input: NewTask = serde_json::from_str(
            r#"{"title":"Ship it","status":"in progress","label":"bug","priority":"critical",
                "dueDate":"2026-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(input.status, TaskStatus::InProgress);
        assert_eq!(input.label, TaskLabel::Bug);
        assert_eq!(input.priority, TaskPriority::Critical);
        assert!(input.due_date.is_some());
        assert!(input.assignee.is_none());
    }

    #[test]
    fn test_changes_only_title() {
        let changes: TaskChanges = serde_json::from_str(r#"{"title":"Renamed"}"#).unwrap();
        assert!(!changes.is_empty());
        assert_eq!(changes.title.as_deref(), Some("Renamed"));
        assert!(changes.status.is_none());
    }
}
