//! Dashboard figures.
//!
//! These are sample figures, not aggregates of stored data. They already
//! have their wire shape, so the mapper passes them through unchanged.

use rust_decimal::Decimal;
use serde::Serialize;

/// One headline figure with its change note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat<T> {
    pub value: T,
    pub change: String,
}

/// Headline cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Stat<MoneyValue>,
    pub subscriptions: Stat<i64>,
    pub sales: Stat<i64>,
    pub active_now: Stat<i64>,
}

/// Monetary amount serialized as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoneyValue(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

/// Revenue of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub data: Vec<MonthlyTotal>,
}

/// A recent sale shown in the sidebar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSale {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSales {
    pub data: Vec<RecentSale>,
    pub total_sales: i64,
}
