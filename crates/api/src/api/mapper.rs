//! Model to response conversions.
//!
//! Stored optional text is an empty string; here it becomes `None`.

use super::dto::{
    AppResponse, AuthUser, ChatMessageResponse, ChatResponse, LoginResponse, TaskResponse,
    UserResponse,
};
use crate::models::{App, ChatConversation, ChatMessage, Task, User};
use crate::services::auth::LoginOutcome;

/// `None` for an empty string.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email.into_inner(),
            phone_number: non_empty(user.phone_number),
            status: user.status,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            status: task.status,
            label: task.label,
            priority: task.priority,
            assignee: non_empty(task.assignee),
            description: non_empty(task.description),
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<App> for AppResponse {
    fn from(app: App) -> Self {
        Self {
            id: app.id,
            name: app.name,
            desc: app.description,
            logo: non_empty(app.logo),
            connected: app.connected,
        }
    }
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender,
            message: message.message,
            timestamp: message.timestamp,
        }
    }
}

impl From<ChatConversation> for ChatResponse {
    fn from(chat: ChatConversation) -> Self {
        Self {
            id: chat.id,
            username: chat.username,
            full_name: chat.full_name,
            title: non_empty(chat.title),
            profile: non_empty(chat.profile),
            messages: chat.messages.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: AuthUser {
                account_no: outcome.user.id.to_string(),
                email: outcome.user.email.into_inner(),
                role: vec![outcome.user.role],
                exp: outcome.expires_at,
            },
            access_token: outcome.access_token,
        }
    }
}
