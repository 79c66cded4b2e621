//! Per-request cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::ServiceError;

/// Cancellation scope of one request.
///
/// The token is a child of the server's shutdown token, so a shutdown stops
/// every request that has not reached the store yet.
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Instant,
}

impl RequestContext {
    /// Create a context that expires `timeout` from now.
    #[must_use]
    pub fn new(parent: &CancellationToken, timeout: Duration) -> Self {
        Self {
            token: parent.child_token(),
            deadline: Instant::now() + timeout,
        }
    }

    /// Fail fast if the request is already cancelled or past its deadline.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled` or `ServiceError::DeadlineExceeded`.
    pub fn ensure_active(&self) -> Result<(), ServiceError> {
        if self.token.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return Err(ServiceError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Check the context, then drive `fut` to completion.
    ///
    /// Once started, a store call is never interrupted: a write that commits
    /// is always reported as a success, even if the request is cancelled or
    /// its deadline passes while it runs.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled` or `ServiceError::DeadlineExceeded`
    /// without polling `fut`, or the future's own error.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        self.ensure_active()?;
        fut.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_active_context_runs_future() {
        let ctx = RequestContext::new(&CancellationToken::new(), Duration::from_secs(5));
        assert!(ctx.ensure_active().is_ok());

        let value = ctx.run(async { Ok::<_, ServiceError>(7) }).await;
        assert!(matches!(value, Ok(7)));
    }

    #[tokio::test]
    async fn test_parent_cancellation_propagates() {
        let shutdown = CancellationToken::new();
        let ctx = RequestContext::new(&shutdown, Duration::from_secs(5));
        shutdown.cancel();

        assert!(matches!(ctx.ensure_active(), Err(ServiceError::Cancelled)));

        let value = ctx.run(async { Ok::<_, ServiceError>(()) }).await;
        assert!(matches!(value, Err(ServiceError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::new(&CancellationToken::new(), Duration::from_millis(50));
        tokio::time::advance(Duration::from_millis(60)).await;

        assert!(matches!(
            ctx.ensure_active(),
            Err(ServiceError::DeadlineExceeded)
        ));
        let value = ctx.run(async { Ok::<_, ServiceError>(()) }).await;
        assert!(matches!(value, Err(ServiceError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_work_outlives_deadline() {
        let ctx = RequestContext::new(&CancellationToken::new(), Duration::from_millis(50));

        let value = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, ServiceError>(7)
            })
            .await;
        assert!(matches!(value, Ok(7)));
    }

    #[tokio::test]
    async fn test_started_work_outlives_cancellation() {
        let shutdown = CancellationToken::new();
        let ctx = RequestContext::new(&shutdown, Duration::from_secs(5));

        let value = ctx
            .run(async {
                shutdown.cancel();
                tokio::task::yield_now().await;
                Ok::<_, ServiceError>("committed")
            })
            .await;
        assert!(matches!(value, Ok("committed")));
        assert!(matches!(ctx.ensure_active(), Err(ServiceError::Cancelled)));
    }
}
