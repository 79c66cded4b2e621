//! Dashboard route handlers.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::dispatch;
use crate::api::AdminApi;
use crate::api::dto::{DashboardOverview, DashboardStats, RecentSales};
use crate::error::ErrorResponse;
use crate::state::AppState;

/// `GET /dashboard/stats`
#[instrument(skip_all)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().dashboard_stats(&ctx))
        .await
        .map(Json)
}

/// `GET /dashboard/overview`
#[instrument(skip_all)]
pub async fn overview(
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().dashboard_overview(&ctx))
        .await
        .map(Json)
}

/// `GET /dashboard/recent-sales`
#[instrument(skip_all)]
pub async fn recent_sales(
    State(state): State<AppState>,
) -> Result<Json<RecentSales>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().recent_sales(&ctx))
        .await
        .map(Json)
}
