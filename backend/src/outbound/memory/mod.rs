//! In-memory adapters implementing every driven port.
//!
//! One [`InMemoryCommunityStore`] holds all tables behind a single mutex, so
//! each port call runs as one atomic unit of work: the accept race is closed
//! by re-checking the question under the same guard that applies the
//! mutation. The server falls back to this store when no database URL is
//! configured, and tests use it to exercise the services end to end.

mod matching;
mod questions;
mod users;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::experience::credit;
use crate::domain::{
    Answer, AnswerId, ExperienceAward, MatchingPost, MatchingPostReview, PostId, Question,
    QuestionId, ReviewId, User, UserId,
};

#[derive(Debug, Default)]
struct Sequences {
    user: i64,
    question: i64,
    answer: i64,
    post: i64,
    review: i64,
}

fn next_id(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

#[derive(Debug, Default)]
struct CommunityState {
    sequences: Sequences,
    users: BTreeMap<UserId, User>,
    questions: BTreeMap<QuestionId, Question>,
    answers: BTreeMap<AnswerId, Answer>,
    awards: Vec<ExperienceAward>,
    posts: BTreeMap<PostId, MatchingPost>,
    reviews: BTreeMap<ReviewId, MatchingPostReview>,
}

impl CommunityState {
    /// Apply an award to its beneficiary's counters and append it to the
    /// ledger.
    fn record_award(&mut self, award: ExperienceAward) {
        if let Some(user) = self.users.get_mut(&award.beneficiary_id) {
            user.experience = credit(user.experience, award.amount);
        }
        self.awards.push(award);
    }

    fn decrement_answer_count(&mut self, user_id: UserId) {
        if let Some(user) = self.users.get_mut(&user_id) {
            if user.answer_count == 0 {
                tracing::warn!(user_id = %user_id, "answer_count already zero; not decremented");
            }
            user.answer_count = user.answer_count.saturating_sub(1);
        }
    }
}

/// Mutex-guarded store backing all repositories in memory.
///
/// One store serves every port, so services built over clones of the same
/// `Arc` observe each other's writes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use titto_backend::domain::ports::{AccountCommand, AccountQuery};
/// use titto_backend::domain::{
///     AccountService, Department, Email, NewUser, Nickname, PersonName, StudentNo,
/// };
/// use titto_backend::outbound::memory::InMemoryCommunityStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(InMemoryCommunityStore::new());
/// let accounts = AccountService::new(Arc::clone(&store), Arc::new(DefaultClock));
/// let email = Email::new("Ada@titto.ac.kr").unwrap();
/// let created = accounts
///     .signup(NewUser {
///         email: email.clone(),
///         name: PersonName::new("Ada Lovelace").unwrap(),
///         nickname: Nickname::new("ada").unwrap(),
///         student_no: StudentNo::new("20240001").unwrap(),
///         department: Department::new("Mathematics").unwrap(),
///     })
///     .await
///     .unwrap();
///
/// let logged_in = accounts.login(&email).await.unwrap();
/// assert_eq!(logged_in.id, created.id);
/// assert_eq!(accounts.profile(created.id).await.unwrap().experience, 0);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCommunityStore {
    state: Mutex<CommunityState>,
}

impl InMemoryCommunityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CommunityState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn oldest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, i64)) {
    items.sort_by_key(key);
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
