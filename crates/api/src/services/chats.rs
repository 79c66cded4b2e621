//! Chat inbox service.

use sqlx::PgPool;
use tracing::instrument;

use backoffice_core::{ChatId, Page};

use super::{RequestContext, ServiceError};
use crate::db::ChatRepository;
use crate::models::chat::CURRENT_USER_SENDER;
use crate::models::{ChatConversation, ChatListParams, ChatMessage, NewChatMessage};

/// Reads conversations and posts messages.
#[derive(Debug, Clone)]
pub struct ChatService {
    pool: PgPool,
}

impl ChatService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repo(&self) -> ChatRepository<'_> {
        ChatRepository::new(&self.pool)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on store failure.
    #[instrument(skip(self, ctx))]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        params: &ChatListParams,
    ) -> Result<Page<ChatConversation>, ServiceError> {
        ctx.ensure_active()?;
        Ok(self.repo().list(params).await?)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::ChatNotFound` if no conversation has this ID.
    #[instrument(skip(self, ctx), fields(chat_id = %id))]
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: &ChatId,
    ) -> Result<ChatConversation, ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::ChatNotFound)
    }

    /// Append a message from the current user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::BadRequest` for an empty message, or
    /// `ServiceError::ChatNotFound` if the conversation does not exist (in
    /// which case nothing is stored).
    #[instrument(skip(self, ctx, input), fields(chat_id = %id))]
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        id: &ChatId,
        input: &NewChatMessage,
    ) -> Result<ChatMessage, ServiceError> {
        ctx.ensure_active()?;
        if input.message.is_empty() {
            return Err(ServiceError::BadRequest("message must not be empty".to_owned()));
        }

        self.repo()
            .add_message(id, CURRENT_USER_SENDER, &input.message)
            .await?
            .ok_or(ServiceError::ChatNotFound)
    }
}
