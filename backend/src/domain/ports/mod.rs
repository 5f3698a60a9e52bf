//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe the storage the domain needs and
//! expose strongly typed errors so adapters map their failures into
//! predictable variants. Driving ports (`*Command`, `*Query`) are what the
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod answer_repository;
mod matching_board;
mod matching_repository;
mod question_board;
mod question_repository;
mod user_repository;

#[cfg(test)]
pub use accounts::{MockAccountCommand, MockAccountQuery};
pub use accounts::{AccountCommand, AccountQuery};
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{Acceptance, AnswerRepository, AnswerRepositoryError};
#[cfg(test)]
pub use matching_board::{MockMatchingBoardCommand, MockMatchingBoardQuery};
pub use matching_board::{MatchingBoardCommand, MatchingBoardQuery};
#[cfg(test)]
pub use matching_repository::{MockMatchingPostRepository, MockMatchingReviewRepository};
pub use matching_repository::{
    MatchingPostRepository, MatchingRepositoryError, MatchingReviewRepository,
};
#[cfg(test)]
pub use question_board::{MockAnswerCommand, MockQuestionCommand, MockQuestionQuery};
pub use question_board::{AnswerCommand, QuestionCommand, QuestionQuery};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
