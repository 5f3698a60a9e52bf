//! Driving ports for the matching board.

use async_trait::async_trait;

use crate::domain::{
    Category, Content, Error, MatchingPost, MatchingPostEdit, MatchingPostReview, Page,
    PageRequest, PostId, ReviewId, Title, UserId,
};

/// Matching board mutations. Edits and deletions are author only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchingBoardCommand: Send + Sync {
    /// Publish a recruiting post.
    async fn create_post(
        &self,
        author_id: UserId,
        category: Category,
        title: Title,
        content: Content,
    ) -> Result<MatchingPost, Error>;

    /// Edit a post.
    async fn update_post(
        &self,
        post_id: PostId,
        caller_id: UserId,
        edit: MatchingPostEdit,
    ) -> Result<MatchingPost, Error>;

    /// Delete a post and its reviews.
    async fn delete_post(&self, post_id: PostId, caller_id: UserId) -> Result<(), Error>;

    /// Review a post.
    async fn create_review(
        &self,
        post_id: PostId,
        author_id: UserId,
        content: Content,
    ) -> Result<MatchingPostReview, Error>;

    /// Edit a review.
    async fn update_review(
        &self,
        review_id: ReviewId,
        caller_id: UserId,
        content: Content,
    ) -> Result<MatchingPostReview, Error>;

    /// Delete a review.
    async fn delete_review(&self, review_id: ReviewId, caller_id: UserId) -> Result<(), Error>;
}

/// Matching board reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchingBoardQuery: Send + Sync {
    /// Fetch a post, counting the view.
    async fn get_post(&self, post_id: PostId) -> Result<MatchingPost, Error>;

    /// List posts newest first, optionally within one category.
    async fn list_posts(
        &self,
        category: Option<Category>,
        page: PageRequest,
    ) -> Result<Page<MatchingPost>, Error>;

    /// List a post's reviews, oldest first.
    async fn list_reviews(&self, post_id: PostId) -> Result<Vec<MatchingPostReview>, Error>;
}
