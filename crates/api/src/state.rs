//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::config::BackofficeConfig;
use crate::error::ErrorMapper;
use crate::services::{AdminHandler, RequestContext, Services};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BackofficeConfig,
    pool: PgPool,
    api: AdminHandler,
    errors: ErrorMapper,
    shutdown: CancellationToken,
}

impl AppState {
    /// Build the state, wiring every service over `pool`.
    ///
    /// Cancelling `shutdown` cancels every request context derived from it.
    #[must_use]
    pub fn new(config: BackofficeConfig, pool: PgPool, shutdown: CancellationToken) -> Self {
        let api = AdminHandler::new(Services::new(&pool));
        let errors = ErrorMapper::new(config.expose_error_details);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                api,
                errors,
                shutdown,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackofficeConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The dispatch façade.
    #[must_use]
    pub fn api(&self) -> &AdminHandler {
        &self.inner.api
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorMapper {
        &self.inner.errors
    }

    /// A fresh context for one request, bounded by the configured timeout.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(&self.inner.shutdown, self.inner.config.request_timeout)
    }
}
