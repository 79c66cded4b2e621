//! Backoffice user domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use backoffice_core::{Email, PageRequest, UserId, UserRole, UserStatus};

/// A backoffice user (domain type).
///
/// The password hash is not part of the model; only the login path reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique; derived from the email's local part at creation.
    pub username: String,
    /// Unique.
    pub email: Email,
    /// Empty when absent.
    pub phone_number: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a user directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// Request to invite a user by email.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteUser {
    pub email: Email,
    #[serde(default)]
    pub role: UserRole,
}

/// Partial update of a user. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
}

impl UserChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.status.is_none()
            && self.role.is_none()
    }
}

/// Parameters for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListParams {
    pub page: PageRequest,
    /// Match any of these statuses; empty means no constraint.
    pub status: Vec<UserStatus>,
    /// Match any of these roles; empty means no constraint.
    pub role: Vec<UserRole>,
    /// Case-insensitive substring of the username.
    pub username: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_role() {
        let input: NewUser = serde_json::from_str(
            r#"{"firstName":"Olivia","lastName":"Martin","email":"olivia@email.com"}"#,
        )
        .unwrap();
        assert_eq!(input.role, UserRole::Cashier);
        assert_eq!(input.phone_number, None);
    }

    #[test]
    fn test_new_user_rejects_bad_email() {
        let result = serde_json::from_str::<NewUser>(
            r#"{"firstName":"A","lastName":"B","email":"nope","role":"admin"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_changes_is_empty() {
        let changes: UserChanges = serde_json::from_str("{}").unwrap();
        assert!(changes.is_empty());

        let changes: UserChanges = serde_json::from_str(r#"{"status":"inactive"}"#).unwrap();
        assert!(!changes.is_empty());
        assert_eq!(changes.status, Some(UserStatus::Inactive));
    }
}
