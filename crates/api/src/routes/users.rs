//! User route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use backoffice_core::{Page, UserId};

use super::dispatch;
use super::extract::{ApiJson, ApiPath, ApiQuery, FromQuery, QueryPairs};
use crate::api::AdminApi;
use crate::api::dto::UserResponse;
use crate::error::ErrorResponse;
use crate::models::{InviteUser, NewUser, UserChanges, UserListParams};
use crate::state::AppState;

impl FromQuery for UserListParams {
    fn from_query(query: &QueryPairs) -> Result<Self, String> {
        Ok(Self {
            page: query.page()?,
            status: query.all("status")?,
            role: query.all("role")?,
            username: query.text("username"),
        })
    }
}

/// `GET /users`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<UserListParams>,
) -> Result<Json<Page<UserResponse>>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().list_users(&ctx, params))
        .await
        .map(Json)
}

/// `POST /users`
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), ErrorResponse> {
    let ctx = state.request_context();
    let user = dispatch(&state, &ctx, state.api().create_user(&ctx, input)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /users/invite`
#[instrument(skip_all)]
pub async fn invite(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<InviteUser>,
) -> Result<(StatusCode, Json<UserResponse>), ErrorResponse> {
    let ctx = state.request_context();
    let user = dispatch(&state, &ctx, state.api().invite_user(&ctx, input)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{user_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().get_user(&ctx, id))
        .await
        .map(Json)
}

/// `PUT /users/{user_id}`
#[instrument(skip(state, changes))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(changes): ApiJson<UserChanges>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().update_user(&ctx, id, changes))
        .await
        .map(Json)
}

/// `DELETE /users/{user_id}`
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<StatusCode, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().delete_user(&ctx, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
