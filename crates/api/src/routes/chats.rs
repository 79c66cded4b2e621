//! Chat route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use backoffice_core::{ChatId, Page};

use super::dispatch;
use super::extract::{ApiJson, ApiPath, ApiQuery, FromQuery, QueryPairs};
use crate::api::AdminApi;
use crate::api::dto::{ChatMessageResponse, ChatResponse};
use crate::error::ErrorResponse;
use crate::models::{ChatListParams, NewChatMessage};
use crate::state::AppState;

impl FromQuery for ChatListParams {
    fn from_query(query: &QueryPairs) -> Result<Self, String> {
        Ok(Self {
            page: query.page()?,
            search: query.text("search"),
        })
    }
}

/// `GET /chats`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ChatListParams>,
) -> Result<Json<Page<ChatResponse>>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().list_chats(&ctx, params))
        .await
        .map(Json)
}

/// `GET /chats/{chat_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ChatId>,
) -> Result<Json<ChatResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().get_chat(&ctx, id))
        .await
        .map(Json)
}

/// `POST /chats/{chat_id}/messages`
#[instrument(skip(state, input))]
pub async fn send_message(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ChatId>,
    ApiJson(input): ApiJson<NewChatMessage>,
) -> Result<(StatusCode, Json<ChatMessageResponse>), ErrorResponse> {
    let ctx = state.request_context();
    let message = dispatch(&state, &ctx, state.api().send_message(&ctx, id, input)).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
