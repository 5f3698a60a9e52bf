//! PostgreSQL-backed matching board repositories using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    MatchingPostRepository, MatchingRepositoryError, MatchingReviewRepository,
};
use crate::domain::{
    Category, Content, MatchingPost, MatchingPostEdit, MatchingPostReview, MatchingPostStatus,
    NewMatchingPost, NewReview, Page, PageRequest, PostId, ReviewId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    MatchingPostRow, MatchingPostUpdate, NewMatchingPostRow, NewReviewRow, ReviewRow,
    collect_rows,
};
use super::pool::{DbPool, PoolError};
use super::schema::{matching_post_reviews, matching_posts};

const POST_FOREIGN_KEY: &str = "matching_post_reviews_post_id_fkey";

/// Diesel-backed implementation of both matching board ports.
///
/// Reviews are removed with their post by `ON DELETE CASCADE`.
#[derive(Clone)]
pub struct DieselMatchingRepository {
    pool: DbPool,
}

impl DieselMatchingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MatchingRepositoryError {
    map_basic_pool_error(error, |message| MatchingRepositoryError::connection(message))
}

fn map_diesel_error(error: DieselError) -> MatchingRepositoryError {
    map_basic_diesel_error(
        error,
        MatchingRepositoryError::query,
        MatchingRepositoryError::connection,
    )
}

fn to_post(row: MatchingPostRow) -> Result<MatchingPost, MatchingRepositoryError> {
    MatchingPost::try_from(row).map_err(MatchingRepositoryError::query)
}

fn to_review(row: ReviewRow) -> Result<MatchingPostReview, MatchingRepositoryError> {
    MatchingPostReview::try_from(row).map_err(MatchingRepositoryError::query)
}

#[async_trait]
impl MatchingPostRepository for DieselMatchingRepository {
    async fn insert(
        &self,
        post: &NewMatchingPost,
    ) -> Result<MatchingPost, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMatchingPostRow {
            author_id: post.author_id.get(),
            category: post.category.as_str(),
            status: MatchingPostStatus::Recruiting.as_str(),
            title: post.title.as_str(),
            content: post.content.as_str(),
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        let stored: MatchingPostRow = diesel::insert_into(matching_posts::table)
            .values(&row)
            .returning(MatchingPostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_post(stored)
    }

    async fn find_by_id(
        &self,
        id: PostId,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        matching_posts::table
            .find(id.get())
            .select(MatchingPostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_post)
            .transpose()
    }

    async fn record_view(
        &self,
        id: PostId,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(matching_posts::table.find(id.get()))
            .set(matching_posts::view_count.eq(matching_posts::view_count + 1))
            .returning(MatchingPostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_post)
            .transpose()
    }

    async fn list(
        &self,
        category: Option<Category>,
        page: PageRequest,
    ) -> Result<Page<MatchingPost>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let wanted = category.as_ref().map(Category::as_str);

        let mut count_query = matching_posts::table.into_boxed();
        let mut page_query = matching_posts::table.into_boxed();
        if let Some(category) = wanted {
            count_query = count_query.filter(matching_posts::category.eq(category));
            page_query = page_query.filter(matching_posts::category.eq(category));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<MatchingPostRow> = page_query
            .order_by((matching_posts::created_at.desc(), matching_posts::id.desc()))
            .limit(i64::from(page.limit()))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .select(MatchingPostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let items = collect_rows(rows).map_err(MatchingRepositoryError::query)?;
        Ok(Page::new(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn update(
        &self,
        id: PostId,
        edit: &MatchingPostEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = MatchingPostUpdate {
            category: edit.category.as_str(),
            status: edit.status.as_str(),
            title: edit.title.as_str(),
            content: edit.content.as_str(),
            updated_at,
        };
        diesel::update(matching_posts::table.find(id.get()))
            .set(&changes)
            .returning(MatchingPostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_post)
            .transpose()
    }

    async fn delete(&self, id: PostId) -> Result<bool, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(matching_posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl MatchingReviewRepository for DieselMatchingRepository {
    async fn insert(
        &self,
        review: &NewReview,
    ) -> Result<MatchingPostReview, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewReviewRow {
            post_id: review.post_id.get(),
            author_id: review.author_id.get(),
            content: review.content.as_str(),
            created_at: review.created_at,
            updated_at: review.created_at,
        };
        let stored: ReviewRow = diesel::insert_into(matching_post_reviews::table)
            .values(&row)
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
                    if info.constraint_name() == Some(POST_FOREIGN_KEY) =>
                {
                    MatchingRepositoryError::post_missing(row.post_id)
                }
                other => map_diesel_error(other),
            })?;
        to_review(stored)
    }

    async fn find_by_id(
        &self,
        id: ReviewId,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        matching_post_reviews::table
            .find(id.get())
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_review)
            .transpose()
    }

    async fn list_for_post(
        &self,
        post_id: PostId,
    ) -> Result<Vec<MatchingPostReview>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewRow> = matching_post_reviews::table
            .filter(matching_post_reviews::post_id.eq(post_id.get()))
            .order_by((
                matching_post_reviews::created_at.asc(),
                matching_post_reviews::id.asc(),
            ))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows).map_err(MatchingRepositoryError::query)
    }

    async fn update_content(
        &self,
        id: ReviewId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(matching_post_reviews::table.find(id.get()))
            .set((
                matching_post_reviews::content.eq(content.as_str()),
                matching_post_reviews::updated_at.eq(updated_at),
            ))
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_review)
            .transpose()
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, MatchingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(matching_post_reviews::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
