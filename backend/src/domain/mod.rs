//! Domain primitives, the experience ledger, and the board services.
//!
//! Purpose: define strongly typed entities and the use-cases that operate on
//! them, independent of HTTP and SQL. Entities reference each other by id;
//! multi-row mutations are delegated to driven ports as single units of work.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Question, Answer, MatchingPost, MatchingPostReview: entities.
//! - ExperienceAward / ExperienceHistory: the ledger.
//! - AccountService, QuestionBoardService, MatchingBoardService: use-cases
//!   implementing the driving ports in [`ports`].

pub mod account_service;
mod answer;
mod answer_workflow;
pub mod authorship;
pub mod error;
pub mod experience;
mod ids;
mod matching;
pub mod matching_board_service;
mod pagination;
pub mod ports;
mod question;
pub mod question_board_service;
mod text;
pub mod trace_id;
mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountService;
pub use self::answer::{Answer, NewAnswer};
pub use self::authorship::ensure_author;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::experience::{AwardCause, AwardDraft, ExperienceAward, ExperienceHistory};
pub use self::ids::{AnswerId, PostId, QuestionId, ReviewId, UserId};
pub use self::matching::{
    MatchingPost, MatchingPostEdit, MatchingPostReview, MatchingPostStatus, NewMatchingPost,
    NewReview,
};
pub use self::matching_board_service::MatchingBoardService;
pub use self::pagination::{PAGE_SIZE, Page, PageRequest};
pub use self::question::{
    NewQuestion, Question, QuestionDetail, QuestionDraft, QuestionEdit, QuestionFilter,
    QuestionStatus,
};
pub use self::question_board_service::QuestionBoardService;
pub use self::text::{
    Category, Content, Department, Email, FieldValidationError, Nickname, PersonName, StudentNo,
    Title,
};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User};
