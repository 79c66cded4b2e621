//! HTTP routes for the backoffice API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness
//! GET    /health/ready                - Readiness (database reachable)
//!
//! # Auth
//! POST   /auth/login                  - Password login
//! POST   /auth/logout                 - Logout (no session to clear)
//! GET    /auth/me                     - Always 401
//!
//! # Users
//! GET    /users                       - Filtered, paginated listing
//! POST   /users                       - Create
//! POST   /users/invite                - Invite by email
//! GET    /users/{user_id}             - Detail
//! PUT    /users/{user_id}             - Partial update
//! DELETE /users/{user_id}             - Delete
//!
//! # Tasks
//! GET    /tasks                       - Filtered, paginated listing
//! POST   /tasks                       - Create
//! GET    /tasks/{task_id}             - Detail
//! PUT    /tasks/{task_id}             - Partial update
//! DELETE /tasks/{task_id}             - Delete
//!
//! # Apps
//! GET    /apps                        - Catalogue listing
//! POST   /apps/{app_id}/connect       - Mark connected
//! POST   /apps/{app_id}/disconnect    - Mark disconnected
//!
//! # Chats
//! GET    /chats                       - Conversations with messages
//! GET    /chats/{chat_id}             - One conversation
//! POST   /chats/{chat_id}/messages    - Post a message
//!
//! # Dashboard
//! GET    /dashboard/stats             - Headline figures
//! GET    /dashboard/overview          - Monthly totals
//! GET    /dashboard/recent-sales      - Latest sales
//! ```

pub mod apps;
pub mod auth;
pub mod chats;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod tasks;
pub mod users;

use std::future::Future;
use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::ErrorResponse;
use crate::services::{RequestContext, ServiceError};
use crate::state::AppState;

/// Run one operation under the request's context and map its failure.
async fn dispatch<T, F>(state: &AppState, ctx: &RequestContext, fut: F) -> Result<T, ErrorResponse>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    ctx.run(fut).await.map_err(|err| state.errors().map(&err))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/invite", post(users::invite))
        .route(
            "/{user_id}",
            get(users::show).put(users::update).delete(users::delete),
        )
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route(
            "/{task_id}",
            get(tasks::show).put(tasks::update).delete(tasks::delete),
        )
}

fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(apps::list))
        .route("/{app_id}/connect", post(apps::connect))
        .route("/{app_id}/disconnect", post(apps::disconnect))
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chats::list))
        .route("/{chat_id}", get(chats::show))
        .route("/{chat_id}/messages", post(chats::send_message))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/overview", get(dashboard::overview))
        .route("/recent-sales", get(dashboard::recent_sales))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/tasks", task_routes())
        .nest("/apps", app_routes())
        .nest("/chats", chat_routes())
        .nest("/dashboard", dashboard_routes())
}

/// The complete application: routes, request tracing and Sentry layers.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::body::{Body, to_bytes};
    use axum::http::{StatusCode, header};
    use secrecy::SecretString;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{BackofficeConfig, LogFormat};

    const UNREACHABLE_DATABASE: &str = "postgres://backoffice@127.0.0.1:1/backoffice";

    fn test_config(expose_error_details: bool) -> BackofficeConfig {
        BackofficeConfig {
            database_url: SecretString::from(UNREACHABLE_DATABASE),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            expose_error_details,
            request_timeout: Duration::from_secs(5),
            run_migrations: false,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        }
    }

    /// A router over a pool that never connects. Only routes that do not
    /// touch the database can succeed.
    fn test_app(expose_error_details: bool, shutdown: CancellationToken) -> Router {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(UNREACHABLE_DATABASE)
            .unwrap();
        app(AppState::new(test_config(expose_error_details), pool, shutdown))
    }

    fn fresh_app() -> Router {
        test_app(false, CancellationToken::new())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(fresh_app(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_owned()));
    }

    #[tokio::test]
    async fn test_readiness_reports_unreachable_database() {
        let (status, _) = send(fresh_app(), get_request("/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_me_is_unauthorized() {
        let (status, body) = send(fresh_app(), get_request("/auth/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Authentication required");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_logout_is_no_content() {
        let request = Request::post("/auth/logout").body(Body::empty()).unwrap();
        let (status, body) = send(fresh_app(), request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_dashboard_endpoints() {
        let app = fresh_app();

        let (status, stats) = send(app.clone(), get_request("/dashboard/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalRevenue"]["value"], 45231.89);
        assert_eq!(stats["activeNow"]["value"], 573);

        let (status, overview) = send(app.clone(), get_request("/dashboard/overview")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(overview["data"].as_array().unwrap().len(), 12);

        let (status, sales) = send(app, get_request("/dashboard/recent-sales")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sales["totalSales"], 2475);
    }

    #[tokio::test]
    async fn test_invalid_page_is_bad_request() {
        let app = test_app(true, CancellationToken::new());
        let (status, body) = send(app, get_request("/users?page=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["details"], "page must be at least 1");
    }

    #[tokio::test]
    async fn test_invalid_filter_is_bad_request() {
        let app = fresh_app();

        let (status, body) = send(app.clone(), get_request("/tasks?status=archived")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("details").is_none());

        let (status, _) = send(app, get_request("/apps?type=sometimes")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_path_id_is_bad_request() {
        let (status, body) = send(fresh_app(), get_request("/users/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::post("/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title": "Ship it", "status": "in_progress"}"#))
            .unwrap();
        let (status, body) = send(fresh_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_blank_task_title_update_is_bad_request() {
        let request = Request::put("/tasks/TASK-0001")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title": "   "}"#))
            .unwrap();
        let (status, body) = send(test_app(true, CancellationToken::new()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["details"], "invalid request: title must not be empty");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::post("/users/invite")
            .body(Body::from(r#"{"email": "a@example.com"}"#))
            .unwrap();
        let (status, _) = send(fresh_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_requests() {
        let shutdown = CancellationToken::new();
        let app = test_app(false, shutdown.clone());
        shutdown.cancel();

        let (status, body) = send(app, get_request("/dashboard/stats")).await;
        assert_eq!(status.as_u16(), 499);
        assert_eq!(body["code"], "REQUEST_CANCELLED");
    }
}
