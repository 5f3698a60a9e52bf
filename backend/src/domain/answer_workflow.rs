//! Answer workflow: posting, editing, removing, and accepting answers.
//!
//! Every operation resolves entities first, then checks authorship, then
//! checks state, and only then issues a single atomic repository mutation.
//! Experience moves through [`super::experience`] awards, never through
//! direct counter arithmetic here.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::experience::{answer_accepted, answer_posted};
use crate::domain::ports::{
    Acceptance, AnswerCommand, AnswerRepository, QuestionRepository, UserRepository,
};
use crate::domain::question_board_service::{
    ACCEPTED_ANSWER_LOCKED, already_accepted, map_answer_error,
};
use crate::domain::{
    Answer, AnswerId, Content, Error, NewAnswer, Question, QuestionBoardService, QuestionId,
    UserId, ensure_author,
};

fn answer_not_found(answer_id: AnswerId) -> Error {
    Error::not_found(format!("answer {answer_id} not found"))
}

impl<Q, A, U> QuestionBoardService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn load_answer(&self, answer_id: AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(answer_id)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| answer_not_found(answer_id))
    }
}

#[async_trait]
impl<Q, A, U> AnswerCommand for QuestionBoardService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn create_answer(
        &self,
        question_id: QuestionId,
        author_id: UserId,
        content: Content,
    ) -> Result<Answer, Error> {
        let question = self.load_question(question_id).await?;
        self.ensure_user_exists(author_id).await?;

        let now = self.clock.utc();
        let award = answer_posted(&question, author_id, now);
        let answer = self
            .answers
            .insert_with_award(
                &NewAnswer {
                    question_id,
                    author_id,
                    content,
                    created_at: now,
                },
                &award,
            )
            .await
            .map_err(map_answer_error)?;
        info!(
            question_id = %question_id,
            answer_id = %answer.id,
            author_id = %author_id,
            points = award.amount,
            "answer posted"
        );
        Ok(answer)
    }

    async fn update_answer(
        &self,
        answer_id: AnswerId,
        caller_id: UserId,
        content: Content,
    ) -> Result<Answer, Error> {
        let answer = self.load_answer(answer_id).await?;
        ensure_author(answer.author_id, caller_id, "answer")?;

        self.answers
            .update_content(answer_id, &content, self.clock.utc())
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| answer_not_found(answer_id))
    }

    async fn delete_answer(&self, answer_id: AnswerId, caller_id: UserId) -> Result<(), Error> {
        let answer = self.load_answer(answer_id).await?;
        ensure_author(answer.author_id, caller_id, "answer")?;
        if answer.accepted {
            warn!(answer_id = %answer_id, "refusing to delete accepted answer");
            return Err(Error::conflict("the accepted answer cannot be deleted")
                .with_reason(ACCEPTED_ANSWER_LOCKED));
        }

        if !self
            .answers
            .delete(answer_id)
            .await
            .map_err(map_answer_error)?
        {
            return Err(answer_not_found(answer_id));
        }
        info!(answer_id = %answer_id, author_id = %caller_id, "answer deleted");
        Ok(())
    }

    async fn accept_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
        caller_id: UserId,
    ) -> Result<Question, Error> {
        let question = self.load_question(question_id).await?;
        let answer = self.load_answer(answer_id).await?;
        if answer.question_id != question_id {
            return Err(Error::not_found(format!(
                "answer {answer_id} does not belong to question {question_id}"
            )));
        }
        ensure_author(question.author_id, caller_id, "question")?;
        if question.is_solved() {
            return Err(already_accepted(question_id));
        }

        let now = self.clock.utc();
        let award = answer_accepted(&question, &answer, now);
        let points = award.amount;
        let solved = self
            .answers
            .accept(&Acceptance {
                question_id,
                answer_id,
                award,
                solved_at: now,
            })
            .await
            .map_err(map_answer_error)?;
        info!(
            question_id = %question_id,
            answer_id = %answer_id,
            beneficiary_id = %answer.author_id,
            points,
            "answer accepted"
        );
        Ok(solved)
    }
}

#[cfg(test)]
#[path = "answer_workflow_tests.rs"]
mod tests;
