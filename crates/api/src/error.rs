//! Error taxonomy and HTTP error mapping.
//!
//! Every failure reaching the HTTP layer is classified into one entry of a
//! static [`ErrorCode`] table, walking the error's `source()` chain:
//! cancellation first, then deadline, then the sentinel kinds. Anything
//! unrecognised is an internal error.

use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::services::ServiceError;

/// Domain condition that maps to a dedicated error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UserNotFound,
    TaskNotFound,
    AppNotFound,
    ChatNotFound,
    InvalidCredentials,
    Unauthorized,
    DuplicateEmail,
    DuplicateUsername,
    BadRequest,
}

/// One row of the error table.
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorCode {
    /// Stable machine-readable code, e.g. `USER_NOT_FOUND`.
    pub code: &'static str,
    /// Client-facing message.
    pub message: &'static str,
    pub status: u16,
    /// The sentinel kind this entry matches; `None` for transport-level codes.
    pub kind: Option<ErrorKind>,
}

impl ErrorCode {
    pub const USER_NOT_FOUND: Self =
        Self::sentinel("USER_NOT_FOUND", "User not found", 404, ErrorKind::UserNotFound);
    pub const TASK_NOT_FOUND: Self =
        Self::sentinel("TASK_NOT_FOUND", "Task not found", 404, ErrorKind::TaskNotFound);
    pub const APP_NOT_FOUND: Self =
        Self::sentinel("APP_NOT_FOUND", "App not found", 404, ErrorKind::AppNotFound);
    pub const CHAT_NOT_FOUND: Self =
        Self::sentinel("CHAT_NOT_FOUND", "Chat not found", 404, ErrorKind::ChatNotFound);
    pub const INVALID_CREDENTIALS: Self = Self::sentinel(
        "INVALID_CREDENTIALS",
        "Invalid email or password",
        401,
        ErrorKind::InvalidCredentials,
    );
    pub const UNAUTHORIZED: Self =
        Self::sentinel("UNAUTHORIZED", "Authentication required", 401, ErrorKind::Unauthorized);
    pub const DUPLICATE_EMAIL: Self =
        Self::sentinel("DUPLICATE_EMAIL", "Email already exists", 409, ErrorKind::DuplicateEmail);
    pub const DUPLICATE_USERNAME: Self = Self::sentinel(
        "DUPLICATE_USERNAME",
        "Username already exists",
        409,
        ErrorKind::DuplicateUsername,
    );
    pub const BAD_REQUEST: Self =
        Self::sentinel("BAD_REQUEST", "Invalid request", 400, ErrorKind::BadRequest);
    pub const INTERNAL_ERROR: Self =
        Self::transport("INTERNAL_ERROR", "An internal error occurred", 500);
    /// 499 is the nginx "client closed request" status.
    pub const REQUEST_CANCELLED: Self =
        Self::transport("REQUEST_CANCELLED", "Request was cancelled", 499);
    pub const REQUEST_TIMEOUT: Self = Self::transport("REQUEST_TIMEOUT", "Request timed out", 504);

    /// Every code, in table order.
    pub const ALL: [&'static Self; 12] = [
        &Self::USER_NOT_FOUND,
        &Self::TASK_NOT_FOUND,
        &Self::APP_NOT_FOUND,
        &Self::CHAT_NOT_FOUND,
        &Self::INVALID_CREDENTIALS,
        &Self::UNAUTHORIZED,
        &Self::DUPLICATE_EMAIL,
        &Self::DUPLICATE_USERNAME,
        &Self::BAD_REQUEST,
        &Self::INTERNAL_ERROR,
        &Self::REQUEST_CANCELLED,
        &Self::REQUEST_TIMEOUT,
    ];

    const fn sentinel(
        code: &'static str,
        message: &'static str,
        status: u16,
        kind: ErrorKind,
    ) -> Self {
        Self {
            code,
            message,
            status,
            kind: Some(kind),
        }
    }

    const fn transport(code: &'static str, message: &'static str, status: u16) -> Self {
        Self {
            code,
            message,
            status,
            kind: None,
        }
    }

    /// The table entry for a sentinel kind.
    #[must_use]
    pub fn for_kind(kind: ErrorKind) -> &'static Self {
        Self::ALL
            .into_iter()
            .find(|code| code.kind == Some(kind))
            .unwrap_or(&Self::INTERNAL_ERROR)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Classify an error by walking its `source()` chain.
#[must_use]
pub fn classify(err: &(dyn StdError + 'static)) -> &'static ErrorCode {
    let chain = || std::iter::successors(Some(err), |&e| e.source());

    if chain().any(|e| {
        matches!(
            e.downcast_ref::<ServiceError>(),
            Some(ServiceError::Cancelled)
        )
    }) {
        return &ErrorCode::REQUEST_CANCELLED;
    }

    if chain().any(|e| {
        matches!(
            e.downcast_ref::<ServiceError>(),
            Some(ServiceError::DeadlineExceeded)
        ) || e.is::<tokio::time::error::Elapsed>()
    }) {
        return &ErrorCode::REQUEST_TIMEOUT;
    }

    chain()
        .find_map(|e| e.downcast_ref::<ServiceError>().and_then(ServiceError::kind))
        .map_or(&ErrorCode::INTERNAL_ERROR, ErrorCode::for_kind)
}

// =============================================================================
// HTTP mapping
// =============================================================================

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A classified error ready to be sent.
#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Turns errors into [`ErrorResponse`]s.
///
/// Whether the error text is exposed as `details` is fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct ErrorMapper {
    expose_details: bool,
}

impl ErrorMapper {
    #[must_use]
    pub const fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }

    /// Classify `err` and build its response. 5xx errors are logged and
    /// reported to Sentry.
    pub fn map<E>(&self, err: &E) -> ErrorResponse
    where
        E: StdError + 'static,
    {
        let code = classify(err);
        if code.status >= 500 {
            let event_id = sentry::capture_error(err);
            tracing::error!(
                error = %err,
                code = code.code,
                sentry_event_id = %event_id,
                "Request failed"
            );
        } else {
            tracing::debug!(error = %err, code = code.code, "Request rejected");
        }
        self.respond(code, err.to_string())
    }

    /// Reject malformed input before it reaches a service.
    pub fn bad_request(&self, reason: impl Into<String>) -> ErrorResponse {
        let reason = reason.into();
        tracing::debug!(reason = %reason, "Bad request");
        self.respond(&ErrorCode::BAD_REQUEST, reason)
    }

    fn respond(&self, code: &'static ErrorCode, details: String) -> ErrorResponse {
        ErrorResponse {
            status: code.status_code(),
            body: ErrorBody {
                code: code.code,
                message: code.message,
                details: self.expose_details.then_some(details),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use thiserror::Error;

    use super::*;
    use crate::db::RepositoryError;

    #[derive(Debug, Error)]
    #[error("while handling request: {0}")]
    struct Wrapped(#[source] ServiceError);

    #[test]
    fn test_table_is_complete_and_unique() {
        let codes: HashSet<_> = ErrorCode::ALL.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), 12);
        assert_eq!(ErrorCode::REQUEST_CANCELLED.status_code().as_u16(), 499);
        assert_eq!(ErrorCode::BAD_REQUEST.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_sentinels_map_to_their_codes() {
        let cases = [
            (ServiceError::UserNotFound, "USER_NOT_FOUND", 404),
            (ServiceError::TaskNotFound, "TASK_NOT_FOUND", 404),
            (ServiceError::AppNotFound, "APP_NOT_FOUND", 404),
            (ServiceError::ChatNotFound, "CHAT_NOT_FOUND", 404),
            (ServiceError::InvalidCredentials, "INVALID_CREDENTIALS", 401),
            (ServiceError::Unauthorized, "UNAUTHORIZED", 401),
            (ServiceError::DuplicateEmail, "DUPLICATE_EMAIL", 409),
            (ServiceError::DuplicateUsername, "DUPLICATE_USERNAME", 409),
            (ServiceError::BadRequest("x".to_owned()), "BAD_REQUEST", 400),
        ];
        for (err, code, status) in cases {
            let classified = classify(&err);
            assert_eq!(classified.code, code);
            assert_eq!(classified.status, status);
        }
    }

    #[test]
    fn test_cancellation_and_timeout() {
        assert_eq!(classify(&ServiceError::Cancelled).code, "REQUEST_CANCELLED");
        assert_eq!(
            classify(&ServiceError::DeadlineExceeded).code,
            "REQUEST_TIMEOUT"
        );
    }

    #[test]
    fn test_wrapped_sentinel_is_found_through_source_chain() {
        let err = Wrapped(ServiceError::ChatNotFound);
        assert_eq!(classify(&err).code, "CHAT_NOT_FOUND");

        let err = Wrapped(ServiceError::Cancelled);
        assert_eq!(classify(&err).code, "REQUEST_CANCELLED");
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let err = ServiceError::Repository(RepositoryError::DataCorruption("bad row".to_owned()));
        assert_eq!(classify(&err).code, "INTERNAL_ERROR");
        assert_eq!(classify(&std::fmt::Error).code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_details_follow_configuration() {
        let hidden = ErrorMapper::new(false).map(&ServiceError::UserNotFound);
        assert_eq!(hidden.status, StatusCode::NOT_FOUND);
        assert_eq!(hidden.body.message, "User not found");
        assert_eq!(hidden.body.details, None);

        let shown = ErrorMapper::new(true).map(&ServiceError::UserNotFound);
        assert_eq!(shown.body.details.as_deref(), Some("user not found"));
    }

    #[test]
    fn test_body_shape() {
        let response = ErrorMapper::new(false).bad_request("page must be at least 1");
        let json = serde_json::to_value(&response.body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "BAD_REQUEST", "message": "Invalid request"})
        );
    }
}
