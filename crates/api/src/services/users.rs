//! User management service.

use sqlx::PgPool;
use tracing::instrument;

use backoffice_core::{Page, UserId, UserStatus};

use super::auth::{generate_temporary_password, hash_password};
use super::{RequestContext, ServiceError};
use crate::db::RepositoryError;
use crate::db::users::{UserRecord, UserRepository};
use crate::models::{InviteUser, NewUser, User, UserChanges, UserListParams};

/// Name given to users created through an invitation.
const INVITED_FIRST_NAME: &str = "Invited";
const INVITED_LAST_NAME: &str = "User";

/// Constraint guarding `users.username`.
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Lists, creates, invites, updates and deletes backoffice users.
#[derive(Debug, Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repo(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Cancelled`/`DeadlineExceeded` if the request is
    /// no longer active, or `ServiceError::Repository` on store failure.
    #[instrument(skip(self, ctx))]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        params: &UserListParams,
    ) -> Result<Page<User>, ServiceError> {
        ctx.ensure_active()?;
        Ok(self.repo().list(params).await?)
    }

    /// Create an active user with a random temporary password.
    ///
    /// The username is the local part of the email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::DuplicateEmail` or `ServiceError::DuplicateUsername`
    /// if either is taken.
    #[instrument(skip(self, ctx, input), fields(email = %input.email))]
    pub async fn create(&self, ctx: &RequestContext, input: &NewUser) -> Result<User, ServiceError> {
        ctx.ensure_active()?;

        let password_hash = hash_password(&generate_temporary_password())?;
        let username = input.email.username();
        let record = UserRecord {
            first_name: &input.first_name,
            last_name: &input.last_name,
            username: &username,
            email: &input.email,
            password_hash: &password_hash,
            phone_number: input.phone_number.as_deref().unwrap_or_default(),
            status: UserStatus::Active,
            role: input.role,
        };

        let user = self.repo().create(&record).await.map_err(map_conflict)?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Create a user in the `invited` state.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::DuplicateEmail` or `ServiceError::DuplicateUsername`
    /// if either is taken.
    #[instrument(skip(self, ctx, input), fields(email = %input.email))]
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        input: &InviteUser,
    ) -> Result<User, ServiceError> {
        ctx.ensure_active()?;

        let password_hash = hash_password(&generate_temporary_password())?;
        let username = input.email.username();
        let record = UserRecord {
            first_name: INVITED_FIRST_NAME,
            last_name: INVITED_LAST_NAME,
            username: &username,
            email: &input.email,
            password_hash: &password_hash,
            phone_number: "",
            status: UserStatus::Invited,
            role: input.role,
        };

        let user = self.repo().create(&record).await.map_err(map_conflict)?;
        tracing::info!(user_id = %user.id, "User invited");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no user has this ID.
    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    /// Apply the fields present in `changes`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no user has this ID, or
    /// `ServiceError::DuplicateEmail` if the new email is taken.
    #[instrument(skip(self, ctx, changes))]
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .update(id, changes)
            .await
            .map_err(map_conflict)?
            .ok_or(ServiceError::UserNotFound)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no row was deleted.
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), ServiceError> {
        ctx.ensure_active()?;
        self.repo()
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, ServiceError::UserNotFound))?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

/// Turn a unique violation into the matching duplicate error.
fn map_conflict(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::Conflict(constraint) if constraint == USERNAME_CONSTRAINT => {
            ServiceError::DuplicateUsername
        }
        RepositoryError::Conflict(_) => ServiceError::DuplicateEmail,
        other => ServiceError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_conflict_by_constraint() {
        assert!(matches!(
            map_conflict(RepositoryError::Conflict("users_username_key".to_owned())),
            ServiceError::DuplicateUsername
        ));
        assert!(matches!(
            map_conflict(RepositoryError::Conflict("users_email_key".to_owned())),
            ServiceError::DuplicateEmail
        ));
        assert!(matches!(
            map_conflict(RepositoryError::NotFound),
            ServiceError::Repository(RepositoryError::NotFound)
        ));
    }
}
