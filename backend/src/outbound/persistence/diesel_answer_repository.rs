//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.
//!
//! Acceptance is a conditional `UPDATE questions ... WHERE accepted_answer_id
//! IS NULL`: under concurrent accepts exactly one transaction sees a matched
//! row, and the rest roll back with `AlreadyAccepted`. The partial unique
//! indexes on `answers` and `experience_awards` back this up at the schema
//! level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{Acceptance, AnswerRepository, AnswerRepositoryError};
use crate::domain::{
    Answer, AnswerId, AwardDraft, Content, NewAnswer, Question, QuestionId, QuestionStatus,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{decrement_answer_count, increment_answer_count, record_award};
use super::models::{AnswerRow, NewAnswerRow, QuestionRow, collect_rows};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, questions, users};

const QUESTION_FOREIGN_KEY: &str = "answers_question_id_fkey";

/// Diesel-backed implementation of the [`AnswerRepository`] port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnswerRepositoryError {
    map_basic_pool_error(error, |message| AnswerRepositoryError::connection(message))
}

fn map_diesel_error(error: DieselError) -> AnswerRepositoryError {
    map_basic_diesel_error(
        error,
        AnswerRepositoryError::query,
        AnswerRepositoryError::connection,
    )
}

/// Lets transaction bodies mix `?` on Diesel results with domain outcomes.
impl From<DieselError> for AnswerRepositoryError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

fn to_answer(row: AnswerRow) -> Result<Answer, AnswerRepositoryError> {
    Answer::try_from(row).map_err(AnswerRepositoryError::query)
}

async fn question_exists<C>(conn: &mut C, question_id: i64) -> Result<bool, DieselError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::select(diesel::dsl::exists(questions::table.find(question_id)))
        .get_result(conn)
        .await
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        answers::table
            .find(id.get())
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_answer)
            .transpose()
    }

    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(question_id.get()))
            .order_by((answers::created_at.asc(), answers::id.asc()))
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows).map_err(AnswerRepositoryError::query)
    }

    async fn insert_with_award(
        &self,
        answer: &NewAnswer,
        award: &AwardDraft,
    ) -> Result<Answer, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAnswerRow {
            question_id: answer.question_id.get(),
            author_id: answer.author_id.get(),
            content: answer.content.as_str(),
            created_at: answer.created_at,
            updated_at: answer.created_at,
        };
        let stored = conn
            .transaction::<_, AnswerRepositoryError, _>(|conn| {
                async move {
                    let inserted: Result<AnswerRow, DieselError> =
                        diesel::insert_into(answers::table)
                            .values(&row)
                            .returning(AnswerRow::as_returning())
                            .get_result(conn)
                            .await;
                    let stored = match inserted {
                        Err(DieselError::DatabaseError(
                            DatabaseErrorKind::ForeignKeyViolation,
                            info,
                        )) if info.constraint_name() == Some(QUESTION_FOREIGN_KEY) => {
                            return Err(AnswerRepositoryError::question_missing(row.question_id));
                        }
                        other => other?,
                    };
                    increment_answer_count(conn, row.author_id).await?;
                    let bound = award.clone().for_answer(AnswerId::new(stored.id));
                    record_award(conn, &bound).await?;
                    Ok(stored)
                }
                .scope_boxed()
            })
            .await?;
        to_answer(stored)
    }

    async fn update_content(
        &self,
        id: AnswerId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(answers::table.find(id.get()))
            .set((
                answers::content.eq(content.as_str()),
                answers::updated_at.eq(updated_at),
            ))
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_answer)
            .transpose()
    }

    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, AnswerRepositoryError, _>(|conn| {
            async move {
                let current: Option<(i64, bool)> = answers::table
                    .find(id.get())
                    .select((answers::author_id, answers::accepted))
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some((author_id, accepted)) = current else {
                    return Ok(false);
                };
                if accepted {
                    return Err(AnswerRepositoryError::accepted_answer_locked(id.get()));
                }
                diesel::delete(answers::table.find(id.get()))
                    .execute(conn)
                    .await?;
                decrement_answer_count(conn, author_id).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
    }

    async fn accept(&self, acceptance: &Acceptance) -> Result<Question, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let question_id = acceptance.question_id.get();
        let answer_id = acceptance.answer_id.get();
        let solved_at = acceptance.solved_at;
        let award = &acceptance.award;

        let solved: QuestionRow = conn
            .transaction::<_, AnswerRepositoryError, _>(|conn| {
                async move {
                    let solved: Option<QuestionRow> = diesel::update(
                        questions::table
                            .find(question_id)
                            .filter(questions::accepted_answer_id.is_null()),
                    )
                    .set((
                        questions::accepted_answer_id.eq(Some(answer_id)),
                        questions::status.eq(QuestionStatus::Solved.as_str()),
                        questions::updated_at.eq(solved_at),
                    ))
                    .returning(QuestionRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                    let Some(solved) = solved else {
                        return Err(if question_exists(conn, question_id).await? {
                            AnswerRepositoryError::already_accepted(question_id)
                        } else {
                            AnswerRepositoryError::question_missing(question_id)
                        });
                    };

                    let marked = diesel::update(
                        answers::table
                            .find(answer_id)
                            .filter(answers::question_id.eq(question_id)),
                    )
                    .set((
                        answers::accepted.eq(true),
                        answers::updated_at.eq(solved_at),
                    ))
                    .execute(conn)
                    .await?;
                    if marked == 0 {
                        return Err(AnswerRepositoryError::answer_missing(answer_id));
                    }

                    diesel::update(users::table.find(award.beneficiary_id.get()))
                        .set(users::accept_count.eq(users::accept_count + 1))
                        .execute(conn)
                        .await?;
                    record_award(conn, award).await?;
                    Ok(solved)
                }
                .scope_boxed()
            })
            .await
            .inspect_err(|err| {
                debug!(question_id, answer_id, error = %err, "accept transaction rolled back");
            })?;
        Question::try_from(solved).map_err(AnswerRepositoryError::query)
    }
}
