//! App integration route handlers.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use backoffice_core::{AppId, Page};

use super::dispatch;
use super::extract::{ApiPath, ApiQuery, FromQuery, QueryPairs};
use crate::api::AdminApi;
use crate::api::dto::AppResponse;
use crate::error::ErrorResponse;
use crate::models::AppListParams;
use crate::state::AppState;

impl FromQuery for AppListParams {
    fn from_query(query: &QueryPairs) -> Result<Self, String> {
        Ok(Self {
            page: query.page()?,
            connection: query.parse_opt("type")?.unwrap_or_default(),
            filter: query.text("filter"),
            sort: query.parse_opt("sort")?,
        })
    }
}

/// `GET /apps`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AppListParams>,
) -> Result<Json<Page<AppResponse>>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().list_apps(&ctx, params))
        .await
        .map(Json)
}

/// `POST /apps/{app_id}/connect`
#[instrument(skip(state))]
pub async fn connect(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AppId>,
) -> Result<Json<AppResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().connect_app(&ctx, id))
        .await
        .map(Json)
}

/// `POST /apps/{app_id}/disconnect`
#[instrument(skip(state))]
pub async fn disconnect(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AppId>,
) -> Result<Json<AppResponse>, ErrorResponse> {
    let ctx = state.request_context();
    dispatch(&state, &ctx, state.api().disconnect_app(&ctx, id))
        .await
        .map(Json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{AppConnection, SortDirection};

    use super::*;

    #[test]
    fn test_list_params_from_query() {
        let query = QueryPairs::parse("type=notConnected&filter=sl&sort=desc");
        let params = AppListParams::from_query(&query).unwrap();
        assert_eq!(params.connection, AppConnection::NotConnected);
        assert_eq!(params.filter.as_deref(), Some("sl"));
        assert_eq!(params.sort, Some(SortDirection::Desc));
    }

    #[test]
    fn test_list_params_defaults() {
        let params = AppListParams::from_query(&QueryPairs::parse("")).unwrap();
        assert_eq!(params.connection, AppConnection::All);
        assert_eq!(params.sort, None);
    }

    #[test]
    fn test_bad_sort_is_rejected() {
        assert!(AppListParams::from_query(&QueryPairs::parse("sort=up")).is_err());
    }
}
