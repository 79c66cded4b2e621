//! Service-layer error type.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::ErrorKind;

/// Errors returned by every command service.
///
/// The unit variants are the sentinel errors the HTTP layer maps to stable
/// error codes; anything else becomes an internal error.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("task not found")]
    TaskNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("chat not found")]
    ChatNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("username already exists")]
    DuplicateUsername,

    /// Input rejected before reaching the store.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// The request's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    /// The request's deadline passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("password hashing failed")]
    PasswordHash,
}

impl ServiceError {
    /// The sentinel kind of this error, if it is one.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::UserNotFound => Some(ErrorKind::UserNotFound),
            Self::TaskNotFound => Some(ErrorKind::TaskNotFound),
            Self::AppNotFound => Some(ErrorKind::AppNotFound),
            Self::ChatNotFound => Some(ErrorKind::ChatNotFound),
            Self::InvalidCredentials => Some(ErrorKind::InvalidCredentials),
            Self::Unauthorized => Some(ErrorKind::Unauthorized),
            Self::DuplicateEmail => Some(ErrorKind::DuplicateEmail),
            Self::DuplicateUsername => Some(ErrorKind::DuplicateUsername),
            Self::BadRequest(_) => Some(ErrorKind::BadRequest),
            Self::Cancelled
            | Self::DeadlineExceeded
            | Self::Repository(_)
            | Self::PasswordHash => None,
        }
    }

    /// Map a repository error, turning `NotFound` into `not_found`.
    pub(crate) fn or_not_found(e: RepositoryError, not_found: Self) -> Self {
        match e {
            RepositoryError::NotFound => not_found,
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_messages() {
        assert_eq!(ServiceError::UserNotFound.to_string(), "user not found");
        assert_eq!(
            ServiceError::DuplicateUsername.to_string(),
            "username already exists"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(ServiceError::AppNotFound.kind(), Some(ErrorKind::AppNotFound));
        assert_eq!(ServiceError::Cancelled.kind(), None);
        assert_eq!(
            ServiceError::Repository(RepositoryError::NotFound).kind(),
            None
        );
    }

    #[test]
    fn test_or_not_found() {
        let err = ServiceError::or_not_found(RepositoryError::NotFound, ServiceError::TaskNotFound);
        assert!(matches!(err, ServiceError::TaskNotFound));

        let err = ServiceError::or_not_found(
            RepositoryError::DataCorruption("bad".to_owned()),
            ServiceError::TaskNotFound,
        );
        assert!(matches!(err, ServiceError::Repository(_)));
    }
}
