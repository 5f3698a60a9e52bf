//! Builders wiring the board services to a storage backend.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use titto_backend::domain::ports::{
    AnswerRepository, MatchingPostRepository, MatchingReviewRepository, QuestionRepository,
    UserRepository,
};
use titto_backend::domain::{AccountService, MatchingBoardService, QuestionBoardService};
use titto_backend::inbound::http::state::HttpState;
use titto_backend::outbound::memory::InMemoryCommunityStore;
use titto_backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselMatchingRepository, DieselQuestionRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Driven adapters for every port the services need.
struct Repositories<U, Q, A, P, R> {
    users: Arc<U>,
    questions: Arc<Q>,
    answers: Arc<A>,
    posts: Arc<P>,
    reviews: Arc<R>,
}

impl<U, Q, A, P, R> Repositories<U, Q, A, P, R>
where
    U: UserRepository + 'static,
    Q: QuestionRepository + 'static,
    A: AnswerRepository + 'static,
    P: MatchingPostRepository + 'static,
    R: MatchingReviewRepository + 'static,
{
    fn into_state(self, clock: Arc<dyn Clock>) -> HttpState {
        let Self {
            users,
            questions,
            answers,
            posts,
            reviews,
        } = self;
        HttpState::from_services(
            Arc::new(AccountService::new(Arc::clone(&users), Arc::clone(&clock))),
            Arc::new(QuestionBoardService::new(
                questions,
                answers,
                Arc::clone(&users),
                Arc::clone(&clock),
            )),
            Arc::new(MatchingBoardService::new(posts, reviews, users, clock)),
        )
    }
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselQuestionRepository,
    DieselAnswerRepository,
    DieselMatchingRepository,
    DieselMatchingRepository,
> {
    let matching = Arc::new(DieselMatchingRepository::new(pool.clone()));
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
        answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
        posts: Arc::clone(&matching),
        reviews: matching,
    }
}

fn memory_repositories() -> Repositories<
    InMemoryCommunityStore,
    InMemoryCommunityStore,
    InMemoryCommunityStore,
    InMemoryCommunityStore,
    InMemoryCommunityStore,
> {
    let store = Arc::new(InMemoryCommunityStore::new());
    Repositories {
        users: Arc::clone(&store),
        questions: Arc::clone(&store),
        answers: Arc::clone(&store),
        posts: Arc::clone(&store),
        reviews: store,
    }
}

/// Build handler state from the configured backend.
///
/// PostgreSQL is used when a pool is configured; otherwise every port is
/// served by one in-memory store that lives as long as the process.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_repositories(pool).into_state(clock)
        }
        None => {
            info!("no database configured; using in-memory repositories");
            memory_repositories().into_state(clock)
        }
    }
}
