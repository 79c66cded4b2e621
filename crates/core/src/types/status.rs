//! Enumerated field values for backoffice entities.
//!
//! Every enum serializes to the exact lowercase label used on the wire and,
//! with the `postgres` feature, maps onto a Postgres enum type of the same
//! labels. `FromStr` accepts the wire label so query-string filters can be
//! parsed without going through serde.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of an enum's declared labels.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct InvalidEnumValue {
    /// Human readable name of the enum, e.g. `user status`.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Implements `as_str`, `Display`, `FromStr` and `ALL` from one label table.
macro_rules! wire_labels {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Every declared value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire label of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(InvalidEnumValue {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

// =============================================================================
// Users
// =============================================================================

/// Account status of a backoffice user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    /// Created through an invitation; has not signed in yet.
    Invited,
    Suspended,
}

wire_labels!(UserStatus, "user status", {
    Active => "active",
    Inactive => "inactive",
    Invited => "invited",
    Suspended => "suspended",
});

/// Role of a backoffice user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Superadmin,
    Admin,
    Manager,
    #[default]
    Cashier,
}

wire_labels!(UserRole, "user role", {
    Superadmin => "superadmin",
    Admin => "admin",
    Manager => "manager",
    Cashier => "cashier",
});

// =============================================================================
// Tasks
// =============================================================================

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "task_status"))]
pub enum TaskStatus {
    #[serde(rename = "backlog")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "backlog"))]
    Backlog,
    #[default]
    #[serde(rename = "todo")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "todo"))]
    Todo,
    /// Serialized with a space, matching the dashboard client's labels.
    #[serde(rename = "in progress")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "in progress"))]
    InProgress,
    #[serde(rename = "done")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "done"))]
    Done,
    #[serde(rename = "canceled")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "canceled"))]
    Canceled,
}

wire_labels!(TaskStatus, "task status", {
    Backlog => "backlog",
    Todo => "todo",
    InProgress => "in progress",
    Done => "done",
    Canceled => "canceled",
});

/// Category label of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "task_label", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum TaskLabel {
    Bug,
    #[default]
    Feature,
    Documentation,
}

wire_labels!(TaskLabel, "task label", {
    Bug => "bug",
    Feature => "feature",
    Documentation => "documentation",
});

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "task_priority", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

wire_labels!(TaskPriority, "task priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

// =============================================================================
// Listing parameters
// =============================================================================

/// Sort direction for list endpoints that accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

wire_labels!(SortDirection, "sort direction", {
    Asc => "asc",
    Desc => "desc",
});

impl SortDirection {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Connection filter for the app catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AppConnection {
    #[default]
    All,
    Connected,
    NotConnected,
}

wire_labels!(AppConnection, "app type", {
    All => "all",
    Connected => "connected",
    NotConnected => "notConnected",
});

impl AppConnection {
    /// The `connected` column value this filter selects, if any.
    #[must_use]
    pub const fn connected(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Connected => Some(true),
            Self::NotConnected => Some(false),
        }
    }
}
