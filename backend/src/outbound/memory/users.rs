//! In-memory [`UserRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryCommunityStore, next_id};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, ExperienceAward, NewUser, User, UserId};

#[async_trait]
impl UserRepository for InMemoryCommunityStore {
    async fn insert(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut guard = self.lock().map_err(UserPersistenceError::query)?;
        let state = &mut *guard;
        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        let id = UserId::new(next_id(&mut state.sequences.user));
        let stored = User::register(id, user.clone(), created_at);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.values().find(|user| &user.email == email).cloned())
    }

    async fn list_awards(
        &self,
        beneficiary_id: UserId,
    ) -> Result<Vec<ExperienceAward>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .awards
            .iter()
            .filter(|award| award.beneficiary_id == beneficiary_id)
            .cloned()
            .collect())
    }
}
