//! Request extractors that reject malformed input as `BAD_REQUEST`.
//!
//! axum's stock extractors answer with plain-text rejections; these wrap
//! them so every rejection goes through the [`ErrorMapper`] and gets the
//! standard error body.
//!
//! [`ErrorMapper`]: crate::error::ErrorMapper

use std::str::FromStr;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use backoffice_core::PageRequest;

use crate::error::ErrorResponse;
use crate::state::AppState;

/// JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T> FromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ErrorResponse;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| state.errors().bad_request(rejection.body_text()))
    }
}

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T> FromRequestParts<AppState> for ApiPath<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| state.errors().bad_request(rejection.body_text()))
    }
}

// =============================================================================
// Query strings
// =============================================================================

/// Decoded query string, keeping repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Decode a raw (percent-encoded) query string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// The first non-empty value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, from repeated keys and comma-separated lists.
    ///
    /// # Errors
    ///
    /// Returns a description of the first value that does not parse.
    pub fn all<T>(&self, key: &str) -> Result<Vec<T>, String>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .flat_map(|(_, v)| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.parse::<T>().map_err(|e| format!("{key}: {e}")))
            .collect()
    }

    /// The first value of `key`, parsed.
    ///
    /// # Errors
    ///
    /// Returns a description of the value if it does not parse.
    pub fn parse_opt<T>(&self, key: &str) -> Result<Option<T>, String>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|v| v.parse::<T>().map_err(|e| format!("{key}: {e}")))
            .transpose()
    }

    /// `page` and `pageSize`, validated.
    ///
    /// # Errors
    ///
    /// Returns a description if either is not a positive integer.
    pub fn page(&self) -> Result<PageRequest, String> {
        let page = self.parse_opt::<u32>("page")?;
        let page_size = self.parse_opt::<u32>("pageSize")?;
        PageRequest::new(page, page_size).map_err(|e| e.to_string())
    }

    /// A free-text needle; empty means absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

/// Parameters that can be built from a query string.
pub trait FromQuery: Sized {
    /// # Errors
    ///
    /// Returns a description of the offending parameter.
    fn from_query(query: &QueryPairs) -> Result<Self, String>;
}

/// Typed query parameters.
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<T> FromRequestParts<AppState> for ApiQuery<T>
where
    T: FromQuery + Send,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query = QueryPairs::parse(parts.uri.query().unwrap_or_default());
        T::from_query(&query)
            .map(Self)
            .map_err(|reason| state.errors().bad_request(reason))
    }
}
