//! Authentication route handlers.
//!
//! Only login does real work. Logout and `me` exist so clients have the
//! endpoints they expect.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::dispatch;
use super::extract::ApiJson;
use crate::api::AdminApi;
use crate::api::dto::{LoginRequest, LoginResponse, UserResponse};
use crate::error::ErrorResponse;
use crate::state::AppState;

/// `POST /auth/login`
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().login(&ctx, request))
        .await
        .map(Json)
}

/// `POST /auth/logout`
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().logout(&ctx)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me`
#[instrument(skip_all)]
pub async fn me(State(state): State<AppState>) -> Result<Json<UserResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().current_user(&ctx))
        .await
        .map(Json)
}
