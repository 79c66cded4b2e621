//! App integration domain types.

use chrono::{DateTime, Utc};

use backoffice_core::{AppConnection, AppId, PageRequest, SortDirection};

/// An app integration (domain type).
///
/// Apps are registered by seeding; the API only toggles `connected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub description: String,
    /// Empty when absent.
    pub logo: String,
    pub connected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for listing apps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppListParams {
    pub page: PageRequest,
    pub connection: AppConnection,
    /// Case-insensitive substring of the name.
    pub filter: Option<String>,
    /// Sort by name; `None` falls back to ID order.
    pub sort: Option<SortDirection>,
}
