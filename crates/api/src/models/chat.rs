//! Chat inbox domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use backoffice_core::{ChatId, ChatMessageId, PageRequest};

/// Sender recorded for messages posted through the API.
///
/// There is no authenticated identity to attribute them to.
pub const CURRENT_USER_SENDER: &str = "current_user";

/// A conversation with its messages, ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConversation {
    pub id: ChatId,
    pub username: String,
    pub full_name: String,
    /// Empty when absent.
    pub title: String,
    /// Empty when absent.
    pub profile: String,
    pub messages: Vec<ChatMessage>,
}

/// A message owned by a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub chat_id: ChatId,
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Request body for posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChatMessage {
    pub message: String,
}

/// Parameters for listing conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatListParams {
    pub page: PageRequest,
    /// Case-insensitive substring of the full name or username.
    pub search: Option<String>,
}
