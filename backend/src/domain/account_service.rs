//! Account domain service.
//!
//! Implements signup, identity resolution, and the profile and experience
//! reads on top of [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{AccountCommand, AccountQuery, UserPersistenceError, UserRepository};
use crate::domain::{Email, Error, ExperienceHistory, NewUser, User, UserId};

/// Reason code attached when signing up with a registered e-mail.
pub const EMAIL_TAKEN: &str = "email_taken";

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a new service backed by the given repository.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

fn email_taken() -> Error {
    Error::conflict("e-mail address is already registered").with_reason(EMAIL_TAKEN)
}

pub(crate) fn user_not_found(user_id: UserId) -> Error {
    Error::not_found(format!("user {user_id} not found"))
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn load_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(user_id))
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn signup(&self, profile: NewUser) -> Result<User, Error> {
        if self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(email_taken());
        }

        let user = self
            .users
            .insert(&profile, self.clock.utc())
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, email: &Email) -> Result<User, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("unknown e-mail address"))
    }
}

#[async_trait]
impl<U> AccountQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn profile(&self, user_id: UserId) -> Result<User, Error> {
        self.load_user(user_id).await
    }

    async fn experience_history(&self, user_id: UserId) -> Result<ExperienceHistory, Error> {
        self.load_user(user_id).await?;
        let awards = self
            .users
            .list_awards(user_id)
            .await
            .map_err(map_user_error)?;
        Ok(ExperienceHistory::from_awards(user_id, awards))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
