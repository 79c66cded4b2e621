//! Chat conversation repository.
//!
//! Conversations are always returned with their messages. A page of
//! conversations costs two extra queries (count, then one batched message
//! fetch), not one per conversation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use backoffice_core::{ChatId, ChatMessageId, Page};

use super::RepositoryError;
use super::listing::{Filter, ListQuery, fetch_page};
use crate::models::{ChatConversation, ChatListParams, ChatMessage};

const COLUMNS: &str = "id, username, full_name, title, profile";
const MESSAGE_COLUMNS: &str = "id, chat_id, sender, message, timestamp";

const LIST: ListQuery = ListQuery {
    columns: COLUMNS,
    table: "chat_conversations",
    order_by: "id",
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    id: String,
    username: String,
    full_name: String,
    title: String,
    profile: String,
}

impl ConversationRow {
    fn with_messages(self, messages: Vec<ChatMessage>) -> ChatConversation {
        ChatConversation {
            id: ChatId::new(self.id),
            username: self.username,
            full_name: self.full_name,
            title: self.title,
            profile: self.profile,
            messages,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    chat_id: String,
    sender: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: ChatMessageId::new(row.id),
            chat_id: ChatId::new(row.chat_id),
            sender: row.sender,
            message: row.message,
            timestamp: row.timestamp,
        }
    }
}

/// Row values for seeding a conversation.
#[derive(Debug, Clone, Copy)]
pub struct ConversationSeed<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub full_name: &'a str,
    pub title: &'a str,
    pub profile: &'a str,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for chat database operations.
pub struct ChatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatRepository<'a> {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List conversations matching `params`, each with its messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn list(
        &self,
        params: &ChatListParams,
    ) -> Result<Page<ChatConversation>, RepositoryError> {
        let filter =
            Filter::new().contains(&["full_name", "username"], params.search.as_deref());

        let (rows, total) =
            fetch_page::<ConversationRow>(self.pool, &LIST, None, &filter, params.page).await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut messages = self.messages_for(&ids).await?;

        let data = rows
            .into_iter()
            .map(|row| {
                let owned = messages.remove(&row.id).unwrap_or_default();
                row.with_messages(owned)
            })
            .collect();

        Ok(Page::new(data, params.page, total))
    }

    /// Get a conversation with its messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_id(&self, id: &ChatId) -> Result<Option<ChatConversation>, RepositoryError> {
        let row = sqlx::query_as::<_, ConversationRow>(&format!(
            "SELECT {COLUMNS} FROM chat_conversations WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut messages = self.messages_for(std::slice::from_ref(&row.id)).await?;
        let owned = messages.remove(&row.id).unwrap_or_default();
        Ok(Some(row.with_messages(owned)))
    }

    /// Append a message to a conversation.
    ///
    /// The insert only happens if the conversation exists; `Ok(None)` means
    /// it does not and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_message(
        &self,
        chat_id: &ChatId,
        sender: &str,
        message: &str,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r"
            INSERT INTO chat_messages (chat_id, sender, message)
            SELECT id, $2, $3 FROM chat_conversations WHERE id = $1
            RETURNING {MESSAGE_COLUMNS}
            "
        ))
        .bind(chat_id.as_str())
        .bind(sender)
        .bind(message)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a conversation unless it already exists.
    ///
    /// Returns `true` if a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_conversation(
        &self,
        seed: &ConversationSeed<'_>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO chat_conversations (id, username, full_name, title, profile)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(seed.id)
        .bind(seed.username)
        .bind(seed.full_name)
        .bind(seed.title)
        .bind(seed.profile)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a message with an explicit timestamp (seeding only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_message_at(
        &self,
        chat_id: &ChatId,
        sender: &str,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r"
            INSERT INTO chat_messages (chat_id, sender, message, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "
        ))
        .bind(chat_id.as_str())
        .bind(sender)
        .bind(message)
        .bind(timestamp)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Fetch the messages of every conversation in `ids`, grouped by conversation.
    async fn messages_for(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<ChatMessage>>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages \
             WHERE chat_id = ANY($1) ORDER BY timestamp, id"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<ChatMessage>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.chat_id.clone())
                .or_default()
                .push(row.into());
        }
        Ok(grouped)
    }
}
