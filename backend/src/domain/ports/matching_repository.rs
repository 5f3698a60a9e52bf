//! Ports for matching board posts and reviews.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Category, Content, MatchingPost, MatchingPostEdit, MatchingPostReview, NewMatchingPost,
    NewReview, Page, PageRequest, PostId, ReviewId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by matching board repository adapters.
    pub enum MatchingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "matching repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "matching repository query failed: {message}",
        /// The post vanished before the mutation ran.
        PostMissing { post_id: i64 } => "matching post {post_id} no longer exists",
    }
}

/// Port for matching post storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchingPostRepository: Send + Sync {
    /// Store a new recruiting post.
    async fn insert(&self, post: &NewMatchingPost) -> Result<MatchingPost, MatchingRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<MatchingPost>, MatchingRepositoryError>;

    /// Increment the view counter and return the updated post.
    async fn record_view(
        &self,
        id: PostId,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError>;

    /// List posts newest first, optionally restricted to one category.
    async fn list(
        &self,
        category: Option<Category>,
        page: PageRequest,
    ) -> Result<Page<MatchingPost>, MatchingRepositoryError>;

    /// Replace the editable fields of a post.
    async fn update(
        &self,
        id: PostId,
        edit: &MatchingPostEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError>;

    /// Delete a post together with its reviews.
    async fn delete(&self, id: PostId) -> Result<bool, MatchingRepositoryError>;
}

/// Port for matching post review storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchingReviewRepository: Send + Sync {
    /// Store a review; fails with
    /// [`MatchingRepositoryError::PostMissing`] if the post is gone.
    async fn insert(
        &self,
        review: &NewReview,
    ) -> Result<MatchingPostReview, MatchingRepositoryError>;

    /// Fetch a review by identifier.
    async fn find_by_id(
        &self,
        id: ReviewId,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError>;

    /// List a post's reviews, oldest first.
    async fn list_for_post(
        &self,
        post_id: PostId,
    ) -> Result<Vec<MatchingPostReview>, MatchingRepositoryError>;

    /// Replace a review's content.
    async fn update_content(
        &self,
        id: ReviewId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError>;

    /// Delete a review.
    async fn delete(&self, id: ReviewId) -> Result<bool, MatchingRepositoryError>;
}
