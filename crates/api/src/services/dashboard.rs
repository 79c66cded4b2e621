//! Dashboard service.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{RequestContext, ServiceError};
use crate::models::{
    DashboardOverview, DashboardStats, MoneyValue, MonthlyTotal, RecentSale, RecentSales, Stat,
};

const MONTHLY_REVENUE: [(&str, i64); 12] = [
    ("Jan", 4500),
    ("Feb", 3200),
    ("Mar", 5100),
    ("Apr", 4800),
    ("May", 6200),
    ("Jun", 5800),
    ("Jul", 4900),
    ("Aug", 5500),
    ("Sep", 6100),
    ("Oct", 5300),
    ("Nov", 4700),
    ("Dec", 6800),
];

/// `(name, email, avatar, amount in cents)`.
const RECENT_SALES: [(&str, &str, &str, i64); 5] = [
    ("Olivia Martin", "olivia.martin@email.com", "/avatars/01.png", 199_900),
    ("Jackson Lee", "jackson.lee@email.com", "/avatars/02.png", 3_900),
    ("Isabella Nguyen", "isabella.nguyen@email.com", "/avatars/03.png", 29_900),
    ("William Kim", "will@email.com", "/avatars/04.png", 9_900),
    ("Sofia Davis", "sofia.davis@email.com", "/avatars/05.png", 3_900),
];

const TOTAL_SALES: i64 = 2475;

/// Serves the dashboard's sample figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardService;

impl DashboardService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled`/`DeadlineExceeded` if the request is
    /// no longer active.
    #[instrument(skip_all)]
    pub fn stats(&self, ctx: &RequestContext) -> Result<DashboardStats, ServiceError> {
        ctx.ensure_active()?;
        Ok(DashboardStats {
            total_revenue: Stat {
                value: MoneyValue(Decimal::new(4_523_189, 2)),
                change: "+20.1% from last month".to_owned(),
            },
            subscriptions: Stat {
                value: 2350,
                change: "+180.1% from last month".to_owned(),
            },
            sales: Stat {
                value: 12234,
                change: "+19% from last month".to_owned(),
            },
            active_now: Stat {
                value: 573,
                change: "+201 since last hour".to_owned(),
            },
        })
    }

    /// Revenue per month, January first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled`/`DeadlineExceeded` if the request is
    /// no longer active.
    #[instrument(skip_all)]
    pub fn overview(&self, ctx: &RequestContext) -> Result<DashboardOverview, ServiceError> {
        ctx.ensure_active()?;
        let data = MONTHLY_REVENUE
            .iter()
            .map(|&(name, total)| MonthlyTotal {
                name: name.to_owned(),
                total: Decimal::from(total),
            })
            .collect();
        Ok(DashboardOverview { data })
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled`/`DeadlineExceeded` if the request is
    /// no longer active.
    #[instrument(skip_all)]
    pub fn recent_sales(&self, ctx: &RequestContext) -> Result<RecentSales, ServiceError> {
        ctx.ensure_active()?;
        let data = RECENT_SALES
            .iter()
            .map(|&(name, email, avatar, cents)| RecentSale {
                name: name.to_owned(),
                email: email.to_owned(),
                avatar: Some(avatar.to_owned()),
                amount: Decimal::new(cents, 2),
            })
            .collect();
        Ok(RecentSales {
            data,
            total_sales: TOTAL_SALES,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new(&CancellationToken::new(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_stats_serialize_as_numbers() {
        let stats = DashboardService::new().stats(&ctx()).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalRevenue"]["value"], serde_json::json!(45231.89));
        assert_eq!(json["activeNow"]["value"], 573);
        assert_eq!(json["sales"]["change"], "+19% from last month");
    }

    #[tokio::test]
    async fn test_overview_covers_twelve_months() {
        let overview = DashboardService::new().overview(&ctx()).unwrap();
        assert_eq!(overview.data.len(), 12);
        assert_eq!(overview.data[0].name, "Jan");
        assert_eq!(overview.data[11].total, Decimal::from(6800));
    }

    #[tokio::test]
    async fn test_recent_sales() {
        let sales = DashboardService::new().recent_sales(&ctx()).unwrap();
        assert_eq!(sales.data.len(), 5);
        assert_eq!(sales.total_sales, 2475);

        let json = serde_json::to_value(&sales).unwrap();
        assert_eq!(json["data"][0]["amount"], serde_json::json!(1999.0));
        assert_eq!(json["data"][3]["email"], "will@email.com");
        assert_eq!(json["totalSales"], 2475);
    }

    #[tokio::test]
    async fn test_cancelled_request_is_rejected() {
        let shutdown = CancellationToken::new();
        let ctx = RequestContext::new(&shutdown, Duration::from_secs(5));
        shutdown.cancel();
        assert!(matches!(
            DashboardService::new().stats(&ctx),
            Err(ServiceError::Cancelled)
        ));
    }
}
