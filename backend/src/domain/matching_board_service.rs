//! Matching board domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::account_service::{map_user_error, user_not_found};
use crate::domain::ports::{
    MatchingBoardCommand, MatchingBoardQuery, MatchingPostRepository, MatchingRepositoryError,
    MatchingReviewRepository, UserRepository,
};
use crate::domain::{
    Category, Content, Error, MatchingPost, MatchingPostEdit, MatchingPostReview,
    NewMatchingPost, NewReview, Page, PageRequest, PostId, ReviewId, Title, UserId,
    ensure_author,
};

/// Matching board service implementing the matching driving ports.
#[derive(Clone)]
pub struct MatchingBoardService<P, R, U> {
    posts: Arc<P>,
    reviews: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, R, U> MatchingBoardService<P, R, U> {
    /// Create a new service with the given repositories.
    pub fn new(posts: Arc<P>, reviews: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            reviews,
            users,
            clock,
        }
    }
}

fn map_matching_error(error: MatchingRepositoryError) -> Error {
    match error {
        MatchingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("matching repository unavailable: {message}"))
        }
        MatchingRepositoryError::Query { message } => {
            Error::internal(format!("matching repository error: {message}"))
        }
        MatchingRepositoryError::PostMissing { post_id } => post_not_found(PostId::new(post_id)),
    }
}

fn post_not_found(post_id: PostId) -> Error {
    Error::not_found(format!("matching post {post_id} not found"))
}

fn review_not_found(review_id: ReviewId) -> Error {
    Error::not_found(format!("review {review_id} not found"))
}

impl<P, R, U> MatchingBoardService<P, R, U>
where
    P: MatchingPostRepository,
    R: MatchingReviewRepository,
    U: UserRepository,
{
    async fn load_post(&self, post_id: PostId) -> Result<MatchingPost, Error> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(map_matching_error)?
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn load_review(&self, review_id: ReviewId) -> Result<MatchingPostReview, Error> {
        self.reviews
            .find_by_id(review_id)
            .await
            .map_err(map_matching_error)?
            .ok_or_else(|| review_not_found(review_id))
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), Error> {
        match self.users.find_by_id(user_id).await.map_err(map_user_error)? {
            Some(_) => Ok(()),
            None => Err(user_not_found(user_id)),
        }
    }
}

#[async_trait]
impl<P, R, U> MatchingBoardCommand for MatchingBoardService<P, R, U>
where
    P: MatchingPostRepository,
    R: MatchingReviewRepository,
    U: UserRepository,
{
    async fn create_post(
        &self,
        author_id: UserId,
        category: Category,
        title: Title,
        content: Content,
    ) -> Result<MatchingPost, Error> {
        self.ensure_user_exists(author_id).await?;
        let post = self
            .posts
            .insert(&NewMatchingPost {
                author_id,
                category,
                title,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_matching_error)?;
        info!(post_id = %post.id, author_id = %author_id, "matching post created");
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: PostId,
        caller_id: UserId,
        edit: MatchingPostEdit,
    ) -> Result<MatchingPost, Error> {
        let post = self.load_post(post_id).await?;
        ensure_author(post.author_id, caller_id, "matching post")?;
        self.posts
            .update(post_id, &edit, self.clock.utc())
            .await
            .map_err(map_matching_error)?
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn delete_post(&self, post_id: PostId, caller_id: UserId) -> Result<(), Error> {
        let post = self.load_post(post_id).await?;
        ensure_author(post.author_id, caller_id, "matching post")?;
        if !self.posts.delete(post_id).await.map_err(map_matching_error)? {
            return Err(post_not_found(post_id));
        }
        info!(post_id = %post_id, "matching post deleted");
        Ok(())
    }

    async fn create_review(
        &self,
        post_id: PostId,
        author_id: UserId,
        content: Content,
    ) -> Result<MatchingPostReview, Error> {
        self.load_post(post_id).await?;
        self.ensure_user_exists(author_id).await?;
        self.reviews
            .insert(&NewReview {
                post_id,
                author_id,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_matching_error)
    }

    async fn update_review(
        &self,
        review_id: ReviewId,
        caller_id: UserId,
        content: Content,
    ) -> Result<MatchingPostReview, Error> {
        let review = self.load_review(review_id).await?;
        ensure_author(review.author_id, caller_id, "review")?;
        self.reviews
            .update_content(review_id, &content, self.clock.utc())
            .await
            .map_err(map_matching_error)?
            .ok_or_else(|| review_not_found(review_id))
    }

    async fn delete_review(&self, review_id: ReviewId, caller_id: UserId) -> Result<(), Error> {
        let review = self.load_review(review_id).await?;
        ensure_author(review.author_id, caller_id, "review")?;
        if !self
            .reviews
            .delete(review_id)
            .await
            .map_err(map_matching_error)?
        {
            return Err(review_not_found(review_id));
        }
        Ok(())
    }
}

#[async_trait]
impl<P, R, U> MatchingBoardQuery for MatchingBoardService<P, R, U>
where
    P: MatchingPostRepository,
    R: MatchingReviewRepository,
    U: UserRepository,
{
    async fn get_post(&self, post_id: PostId) -> Result<MatchingPost, Error> {
        self.posts
            .record_view(post_id)
            .await
            .map_err(map_matching_error)?
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn list_posts(
        &self,
        category: Option<Category>,
        page: PageRequest,
    ) -> Result<Page<MatchingPost>, Error> {
        self.posts
            .list(category, page)
            .await
            .map_err(map_matching_error)
    }

    async fn list_reviews(&self, post_id: PostId) -> Result<Vec<MatchingPostReview>, Error> {
        self.load_post(post_id).await?;
        self.reviews
            .list_for_post(post_id)
            .await
            .map_err(map_matching_error)
    }
}

#[cfg(test)]
#[path = "matching_board_service_tests.rs"]
mod tests;
