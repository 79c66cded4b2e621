//! Password login.
//!
//! Login verifies an Argon2 password hash and hands out an opaque token.
//! Tokens are not stored or checked anywhere: there are no sessions, logout
//! does nothing and the current-user lookup always reports unauthorized.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;
use tracing::instrument;

use backoffice_core::Email;

use super::{RequestContext, ServiceError};
use crate::db::UserRepository;
use crate::models::User;

/// Lifetime of an issued access token.
const TOKEN_TTL_HOURS: i64 = 24;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// Expiry as a Unix timestamp in seconds.
    pub expires_at: i64,
    pub access_token: String,
}

/// Password login and the session stubs around it.
#[derive(Debug, Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidCredentials` for an unknown or malformed
    /// email and for a wrong password alike.
    #[instrument(skip(self, ctx, password))]
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, ServiceError> {
        ctx.ensure_active()?;

        let email = Email::parse(email).map_err(|_| ServiceError::InvalidCredentials)?;
        let Some(credentials) = UserRepository::new(&self.pool)
            .get_credentials_by_email(&email)
            .await?
        else {
            tracing::warn!("Login attempt for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if verify_password(password, &credentials.password_hash).is_err() {
            tracing::warn!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let expires_at = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp();
        tracing::info!(user_id = %credentials.user.id, "User logged in");

        Ok(LoginOutcome {
            user: credentials.user,
            expires_at,
            access_token: generate_access_token(),
        })
    }

    /// Sessions are not tracked, so there is nothing to end.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled`/`DeadlineExceeded` if the request is
    /// no longer active.
    pub fn logout(&self, ctx: &RequestContext) -> Result<(), ServiceError> {
        ctx.ensure_active()
    }

    /// Always unauthorized: issued tokens are never validated.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unauthorized`.
    pub fn current_user(&self, ctx: &RequestContext) -> Result<User, ServiceError> {
        ctx.ensure_active()?;
        Err(ServiceError::Unauthorized)
    }
}

/// Hash a password with Argon2id and a fresh salt.
///
/// # Errors
///
/// Returns `ServiceError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ServiceError::PasswordHash)
}

/// Verify a password against a PHC hash string.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<(), ServiceError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| ServiceError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ServiceError::InvalidCredentials)
}

/// Random password for accounts created by an administrator.
pub(crate) fn generate_temporary_password() -> String {
    random_token(18)
}

fn generate_access_token() -> String {
    random_token(32)
}

fn random_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_malformed_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_tokens_are_random_and_url_safe() {
        let a = generate_access_token();
        let b = generate_access_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(generate_temporary_password().len(), 24);
    }
}
