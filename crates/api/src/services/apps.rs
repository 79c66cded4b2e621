//! App integration service.

use sqlx::PgPool;
use tracing::instrument;

use backoffice_core::{AppId, Page};

use super::{RequestContext, ServiceError};
use crate::db::AppRepository;
use crate::models::{App, AppListParams};

/// Lists apps and toggles their connection.
#[derive(Debug, Clone)]
pub struct AppService {
    pool: PgPool,
}

impl AppService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on store failure.
    #[instrument(skip(self, ctx))]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        params: &AppListParams,
    ) -> Result<Page<App>, ServiceError> {
        ctx.ensure_active()?;
        Ok(AppRepository::new(&self.pool).list(params).await?)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::AppNotFound` if no app has this ID.
    #[instrument(skip(self, ctx), fields(app_id = %id))]
    pub async fn connect(&self, ctx: &RequestContext, id: &AppId) -> Result<App, ServiceError> {
        self.set_connected(ctx, id, true).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::AppNotFound` if no app has this ID.
    #[instrument(skip(self, ctx), fields(app_id = %id))]
    pub async fn disconnect(&self, ctx: &RequestContext, id: &AppId) -> Result<App, ServiceError> {
        self.set_connected(ctx, id, false).await
    }

    async fn set_connected(
        &self,
        ctx: &RequestContext,
        id: &AppId,
        connected: bool,
    ) -> Result<App, ServiceError> {
        ctx.ensure_active()?;
        AppRepository::new(&self.pool)
            .set_connected(id, connected)
            .await
            .map_err(|e| ServiceError::or_not_found(e, ServiceError::AppNotFound))
    }
}
