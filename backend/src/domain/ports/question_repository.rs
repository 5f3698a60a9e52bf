//! Port for question persistence.
//!
//! Questions own their answers: deleting a question removes its answers and
//! walks each answer author's `answer_count` back down in the same unit of
//! work. Award history is left untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewQuestion, Page, PageRequest, Question, QuestionEdit, QuestionFilter, QuestionId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "question repository query failed: {message}",
    }
}

/// Port for question storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Store a new open question and return it with its id.
    async fn insert(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError>;

    /// Fetch a question by identifier.
    async fn find_by_id(&self, id: QuestionId)
    -> Result<Option<Question>, QuestionRepositoryError>;

    /// Increment the view counter and return the updated question.
    ///
    /// Returns `None` when the question does not exist.
    async fn record_view(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// List questions matching `filter`, newest first.
    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, QuestionRepositoryError>;

    /// Replace the editable fields of a question.
    ///
    /// Returns `None` when the question does not exist.
    async fn update(
        &self,
        id: QuestionId,
        edit: &QuestionEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// Delete a question with its answers, decrementing each answer author's
    /// `answer_count` (never below zero).
    ///
    /// Returns `false` when the question did not exist.
    async fn delete(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError>;
}
