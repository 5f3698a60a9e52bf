//! Question board domain service.
//!
//! [`QuestionBoardService`] implements the question lifecycle ports here and
//! the answer workflow in [`super::answer_workflow`]. Both share the same
//! repositories, guards, and error mapping.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::account_service::{map_user_error, user_not_found};
use crate::domain::experience::MAX_BONUS_EXPERIENCE;
use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, QuestionCommand, QuestionQuery, QuestionRepository,
    QuestionRepositoryError, UserRepository,
};
use crate::domain::{
    Error, NewQuestion, Page, PageRequest, Question, QuestionDetail, QuestionDraft, QuestionEdit,
    QuestionFilter, QuestionId, UserId, ensure_author,
};

/// Reason code for accepting on an already solved question.
pub const ALREADY_ACCEPTED_ANSWER: &str = "already_accepted_answer";
/// Reason code for deleting the accepted answer.
pub const ACCEPTED_ANSWER_LOCKED: &str = "accepted_answer_locked";

/// Question board service implementing the question and answer driving
/// ports.
#[derive(Clone)]
pub struct QuestionBoardService<Q, A, U> {
    pub(super) questions: Arc<Q>,
    pub(super) answers: Arc<A>,
    pub(super) users: Arc<U>,
    pub(super) clock: Arc<dyn Clock>,
}

impl<Q, A, U> QuestionBoardService<Q, A, U> {
    /// Create a new service with the given repositories.
    pub fn new(
        questions: Arc<Q>,
        answers: Arc<A>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            answers,
            users,
            clock,
        }
    }
}

pub(super) fn map_question_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

pub(super) fn map_answer_error(error: AnswerRepositoryError) -> Error {
    match error {
        AnswerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("answer repository unavailable: {message}"))
        }
        AnswerRepositoryError::Query { message } => {
            Error::internal(format!("answer repository error: {message}"))
        }
        AnswerRepositoryError::QuestionMissing { question_id } => {
            question_not_found(QuestionId::new(question_id))
        }
        AnswerRepositoryError::AnswerMissing { answer_id } => {
            Error::not_found(format!("answer {answer_id} not found"))
        }
        AnswerRepositoryError::AlreadyAccepted { question_id } => {
            already_accepted(QuestionId::new(question_id))
        }
        AnswerRepositoryError::AcceptedAnswerLocked { answer_id } => {
            Error::conflict("the accepted answer cannot be deleted").with_details(json!({
                "code": ACCEPTED_ANSWER_LOCKED,
                "answerId": answer_id,
            }))
        }
    }
}

pub(super) fn question_not_found(question_id: QuestionId) -> Error {
    Error::not_found(format!("question {question_id} not found"))
}

pub(super) fn already_accepted(question_id: QuestionId) -> Error {
    Error::conflict("question already has an accepted answer").with_details(json!({
        "code": ALREADY_ACCEPTED_ANSWER,
        "questionId": question_id,
    }))
}

impl<Q, A, U> QuestionBoardService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    pub(super) async fn load_question(&self, question_id: QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(question_id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| question_not_found(question_id))
    }

    pub(super) async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| user_not_found(user_id))
    }
}

#[async_trait]
impl<Q, A, U> QuestionCommand for QuestionBoardService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn create_question(
        &self,
        author_id: UserId,
        draft: QuestionDraft,
    ) -> Result<Question, Error> {
        if draft.bonus_experience > MAX_BONUS_EXPERIENCE {
            return Err(
                Error::invalid_request("bonus experience is too large").with_details(json!({
                    "field": "bonusExperience",
                    "max": MAX_BONUS_EXPERIENCE,
                    "code": "field_too_large",
                })),
            );
        }
        self.ensure_user_exists(author_id).await?;

        let question = self
            .questions
            .insert(&NewQuestion {
                author_id,
                draft,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_question_error)?;
        info!(question_id = %question.id, author_id = %author_id, "question created");
        Ok(question)
    }

    async fn update_question(
        &self,
        question_id: QuestionId,
        caller_id: UserId,
        edit: QuestionEdit,
    ) -> Result<Question, Error> {
        let question = self.load_question(question_id).await?;
        ensure_author(question.author_id, caller_id, "question")?;

        self.questions
            .update(question_id, &edit, self.clock.utc())
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| question_not_found(question_id))
    }

    async fn delete_question(
        &self,
        question_id: QuestionId,
        caller_id: UserId,
    ) -> Result<(), Error> {
        let question = self.load_question(question_id).await?;
        ensure_author(question.author_id, caller_id, "question")?;

        if !self
            .questions
            .delete(question_id)
            .await
            .map_err(map_question_error)?
        {
            return Err(question_not_found(question_id));
        }
        info!(question_id = %question_id, "question deleted");
        Ok(())
    }
}

#[async_trait]
impl<Q, A, U> QuestionQuery for QuestionBoardService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn get_question(&self, question_id: QuestionId) -> Result<QuestionDetail, Error> {
        let question = self
            .questions
            .record_view(question_id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| question_not_found(question_id))?;
        let answers = self
            .answers
            .list_for_question(question_id)
            .await
            .map_err(map_answer_error)?;
        Ok(QuestionDetail { question, answers })
    }

    async fn list_questions(
        &self,
        filter: QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, Error> {
        self.questions
            .list(&filter, page)
            .await
            .map_err(map_question_error)
    }
}

#[cfg(test)]
#[path = "question_board_service_tests.rs"]
mod tests;
