//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, ExperienceAward, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The e-mail address is already registered.
        DuplicateEmail { email: String } => "e-mail already registered: {email}",
    }
}

/// Port for account storage and award history lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user with zeroed counters and return it with its id.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the e-mail is
    /// taken, including when a concurrent signup wins the race.
    async fn insert(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised e-mail address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// List every award the user received, in any order.
    async fn list_awards(
        &self,
        beneficiary_id: UserId,
    ) -> Result<Vec<ExperienceAward>, UserPersistenceError>;
}
