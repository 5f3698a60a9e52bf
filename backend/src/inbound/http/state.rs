//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, AnswerCommand, MatchingBoardCommand, MatchingBoardQuery,
    QuestionCommand, QuestionQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub answers: Arc<dyn AnswerCommand>,
    pub matching: Arc<dyn MatchingBoardCommand>,
    pub matching_query: Arc<dyn MatchingBoardQuery>,
}

impl HttpState {
    /// Wire the state from services that implement both halves of each
    /// board's ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use titto_backend::domain::{AccountService, MatchingBoardService, QuestionBoardService};
    /// use titto_backend::inbound::http::state::HttpState;
    /// use titto_backend::outbound::memory::InMemoryCommunityStore;
    ///
    /// let store = Arc::new(InMemoryCommunityStore::default());
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::from_services(
    ///     Arc::new(AccountService::new(store.clone(), clock.clone())),
    ///     Arc::new(QuestionBoardService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///         clock.clone(),
    ///     )),
    ///     Arc::new(MatchingBoardService::new(store.clone(), store.clone(), store, clock)),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_services<A, Q, M>(accounts: Arc<A>, questions: Arc<Q>, matching: Arc<M>) -> Self
    where
        A: AccountCommand + AccountQuery + 'static,
        Q: QuestionCommand + QuestionQuery + AnswerCommand + 'static,
        M: MatchingBoardCommand + MatchingBoardQuery + 'static,
    {
        Self {
            accounts: accounts.clone(),
            accounts_query: accounts,
            questions: questions.clone(),
            questions_query: questions.clone(),
            answers: questions,
            matching: matching.clone(),
            matching_query: matching,
        }
    }
}
