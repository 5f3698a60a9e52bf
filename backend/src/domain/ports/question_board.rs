//! Driving ports for the question board and its answer workflow.

use async_trait::async_trait;

use crate::domain::{
    Answer, AnswerId, Content, Error, Page, PageRequest, Question, QuestionDetail, QuestionDraft,
    QuestionEdit, QuestionFilter, QuestionId, UserId,
};

/// Question lifecycle mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Ask a question. It starts open with no accepted answer.
    async fn create_question(
        &self,
        author_id: UserId,
        draft: QuestionDraft,
    ) -> Result<Question, Error>;

    /// Edit a question's title, content, and department. Author only.
    async fn update_question(
        &self,
        question_id: QuestionId,
        caller_id: UserId,
        edit: QuestionEdit,
    ) -> Result<Question, Error>;

    /// Delete a question and its answers. Author only.
    async fn delete_question(&self, question_id: QuestionId, caller_id: UserId)
    -> Result<(), Error>;
}

/// Question board reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// Fetch a question with its answers, counting the view.
    async fn get_question(&self, question_id: QuestionId) -> Result<QuestionDetail, Error>;

    /// List questions newest first.
    async fn list_questions(
        &self,
        filter: QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, Error>;
}

/// The answer workflow: creation, edits, removal, and acceptance.
///
/// Guards run in the order `not_found`, `forbidden`, `conflict`, and all of
/// them run before anything is written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Post an answer, crediting its author with the posting award.
    async fn create_answer(
        &self,
        question_id: QuestionId,
        author_id: UserId,
        content: Content,
    ) -> Result<Answer, Error>;

    /// Replace an answer's content. Author only.
    async fn update_answer(
        &self,
        answer_id: AnswerId,
        caller_id: UserId,
        content: Content,
    ) -> Result<Answer, Error>;

    /// Delete an answer. Author only; the accepted answer is locked.
    async fn delete_answer(&self, answer_id: AnswerId, caller_id: UserId) -> Result<(), Error>;

    /// Accept an answer, solving the question. Question author only, once.
    async fn accept_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
        caller_id: UserId,
    ) -> Result<Question, Error>;
}
