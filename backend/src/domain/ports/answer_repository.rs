//! Port for answer persistence and the answer workflow's atomic mutations.
//!
//! Each mutating method is one unit of work: the entity change, the counter
//! change and the ledger award land together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Answer, AnswerId, AwardDraft, Content, ExperienceAward, NewAnswer, Question, QuestionId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "answer repository query failed: {message}",
        /// The question vanished before the mutation ran.
        QuestionMissing { question_id: i64 } =>
            "question {question_id} no longer exists",
        /// The answer vanished before the mutation ran.
        AnswerMissing { answer_id: i64 } =>
            "answer {answer_id} no longer exists",
        /// The question already has an accepted answer.
        AlreadyAccepted { question_id: i64 } =>
            "question {question_id} already has an accepted answer",
        /// The accepted answer of a solved question cannot be removed.
        AcceptedAnswerLocked { answer_id: i64 } =>
            "answer {answer_id} is accepted and cannot be deleted",
    }
}

/// Everything the accept mutation writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Question being solved.
    pub question_id: QuestionId,
    /// Answer being accepted.
    pub answer_id: AnswerId,
    /// Award crediting the answer author.
    pub award: ExperienceAward,
    /// Timestamp recorded on the question and answer.
    pub solved_at: DateTime<Utc>,
}

/// Port for answer storage and the answer workflow's mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Fetch an answer by identifier.
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError>;

    /// List a question's answers, oldest first.
    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;

    /// Store an unaccepted answer, increment its author's `answer_count`,
    /// and record `award` bound to the new answer.
    async fn insert_with_award(
        &self,
        answer: &NewAnswer,
        award: &AwardDraft,
    ) -> Result<Answer, AnswerRepositoryError>;

    /// Replace an answer's content.
    ///
    /// Returns `None` when the answer does not exist.
    async fn update_content(
        &self,
        id: AnswerId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError>;

    /// Delete an unaccepted answer and decrement its author's
    /// `answer_count`, never below zero.
    ///
    /// Returns `false` when the answer did not exist and
    /// [`AnswerRepositoryError::AcceptedAnswerLocked`] when it is accepted.
    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError>;

    /// Mark the answer accepted, solve the question, increment the answer
    /// author's `accept_count`, and record the award.
    ///
    /// The "no accepted answer yet" condition is re-checked inside the unit
    /// of work; losing a race yields
    /// [`AnswerRepositoryError::AlreadyAccepted`] with nothing written.
    async fn accept(&self, acceptance: &Acceptance) -> Result<Question, AnswerRepositoryError>;
}
