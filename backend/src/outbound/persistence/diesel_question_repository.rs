//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.
//!
//! Deleting a question removes its answers through the `ON DELETE CASCADE`
//! foreign key; the answer authors' counters are walked back in the same
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{
    NewQuestion, Page, PageRequest, Question, QuestionEdit, QuestionFilter, QuestionId,
    QuestionStatus,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{contains_pattern, decrement_answer_count};
use super::models::{NewQuestionRow, QuestionRow, QuestionUpdate, collect_rows, to_db_count};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, questions};

/// Diesel-backed implementation of the [`QuestionRepository`] port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, |message| QuestionRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

fn to_question(row: QuestionRow) -> Result<Question, QuestionRepositoryError> {
    Question::try_from(row).map_err(QuestionRepositoryError::query)
}

fn filtered(filter: &QuestionFilter) -> questions::BoxedQuery<'_, Pg> {
    let mut query = questions::table.into_boxed();
    if let Some(department) = &filter.department {
        query = query.filter(questions::department.eq(department.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(questions::status.eq(status.as_str()));
    }
    if let Some(keyword) = &filter.keyword {
        query = query.filter(questions::title.ilike(contains_pattern(keyword)));
    }
    query
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = &question.draft;
        let row = NewQuestionRow {
            author_id: question.author_id.get(),
            department: draft.department.as_str(),
            title: draft.title.as_str(),
            content: draft.content.as_str(),
            status: QuestionStatus::Open.as_str(),
            bonus_experience: to_db_count(draft.bonus_experience),
            created_at: question.created_at,
            updated_at: question.created_at,
        };
        let stored: QuestionRow = diesel::insert_into(questions::table)
            .values(&row)
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_question(stored)
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        questions::table
            .find(id.get())
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_question)
            .transpose()
    }

    async fn record_view(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(questions::table.find(id.get()))
            .set(questions::view_count.eq(questions::view_count + 1))
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_question)
            .transpose()
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<QuestionRow> = filtered(filter)
            .order_by((questions::created_at.desc(), questions::id.desc()))
            .limit(i64::from(page.limit()))
            .offset(offset)
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let items = collect_rows(rows).map_err(QuestionRepositoryError::query)?;
        Ok(Page::new(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn update(
        &self,
        id: QuestionId,
        edit: &QuestionEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = QuestionUpdate {
            department: edit.department.as_str(),
            title: edit.title.as_str(),
            content: edit.content.as_str(),
            updated_at,
        };
        diesel::update(questions::table.find(id.get()))
            .set(&changes)
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_question)
            .transpose()
    }

    async fn delete(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let authors: Vec<i64> = answers::table
                    .filter(answers::question_id.eq(id.get()))
                    .select(answers::author_id)
                    .for_update()
                    .load(conn)
                    .await?;
                let deleted = diesel::delete(questions::table.find(id.get()))
                    .execute(conn)
                    .await?;
                if deleted == 0 {
                    return Ok(false);
                }
                for author_id in authors {
                    decrement_answer_count(conn, author_id).await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and query shape coverage.
    use super::*;
    use crate::domain::Department;
    use diesel::debug_query;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(error, QuestionRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn filters_only_add_present_conditions() {
        let unfiltered = debug_query::<Pg, _>(&filtered(&QuestionFilter::default())).to_string();
        let filter = QuestionFilter {
            department: Some(Department::new("Physics").expect("department")),
            status: Some(QuestionStatus::Solved),
            keyword: Some("waves".to_owned()),
        };
        let narrowed = debug_query::<Pg, _>(&filtered(&filter)).to_string();

        assert!(!unfiltered.contains("WHERE"));
        assert!(narrowed.contains("\"department\" = $1"));
        assert!(narrowed.contains("ILIKE"));
        assert!(narrowed.contains("%waves%"));
    }
}
