//! Driving ports for account use-cases.
//!
//! Inbound adapters resolve callers through [`AccountCommand::login`] and
//! read reputation through [`AccountQuery`] without knowing the backing
//! store.

use async_trait::async_trait;

use crate::domain::{Email, Error, ExperienceHistory, NewUser, User, UserId};

/// Account mutations and identity resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a user. Fails with `conflict` (`email_taken`) when the e-mail
    /// is already registered.
    async fn signup(&self, profile: NewUser) -> Result<User, Error>;

    /// Resolve an e-mail address to a registered user. Unknown addresses are
    /// `unauthorized`.
    async fn login(&self, email: &Email) -> Result<User, Error>;
}

/// Account reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch the caller's profile with its reputation counters.
    async fn profile(&self, user_id: UserId) -> Result<User, Error>;

    /// Fetch the awards the user received, newest first, with their total.
    async fn experience_history(&self, user_id: UserId) -> Result<ExperienceHistory, Error>;
}
