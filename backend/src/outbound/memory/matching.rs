//! In-memory matching board repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryCommunityStore, newest_first, next_id, oldest_first};
use crate::domain::ports::{
    MatchingPostRepository, MatchingRepositoryError, MatchingReviewRepository,
};
use crate::domain::{
    Category, Content, MatchingPost, MatchingPostEdit, MatchingPostReview, MatchingPostStatus,
    NewMatchingPost, NewReview, Page, PageRequest, PostId, ReviewId,
};

#[async_trait]
impl MatchingPostRepository for InMemoryCommunityStore {
    async fn insert(
        &self,
        post: &NewMatchingPost,
    ) -> Result<MatchingPost, MatchingRepositoryError> {
        let mut guard = self.lock().map_err(MatchingRepositoryError::query)?;
        let state = &mut *guard;
        let id = PostId::new(next_id(&mut state.sequences.post));
        let stored = MatchingPost {
            id,
            author_id: post.author_id,
            category: post.category.clone(),
            status: MatchingPostStatus::Recruiting,
            title: post.title.clone(),
            content: post.content.clone(),
            view_count: 0,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        state.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: PostId,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.posts.get(&id).cloned())
    }

    async fn record_view(
        &self,
        id: PostId,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let mut state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.posts.get_mut(&id).map(|post| {
            post.view_count = post.view_count.saturating_add(1);
            post.clone()
        }))
    }

    async fn list(
        &self,
        category: Option<Category>,
        page: PageRequest,
    ) -> Result<Page<MatchingPost>, MatchingRepositoryError> {
        let state = self.lock().map_err(MatchingRepositoryError::query)?;
        let mut matching: Vec<MatchingPost> = state
            .posts
            .values()
            .filter(|post| category.as_ref().is_none_or(|wanted| post.category == *wanted))
            .cloned()
            .collect();
        newest_first(&mut matching, |post| (post.created_at, post.id.get()));
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        Ok(Page::new(page.slice(&matching), page, total))
    }

    async fn update(
        &self,
        id: PostId,
        edit: &MatchingPostEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPost>, MatchingRepositoryError> {
        let mut state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.posts.get_mut(&id).map(|post| {
            post.category = edit.category.clone();
            post.status = edit.status;
            post.title = edit.title.clone();
            post.content = edit.content.clone();
            post.updated_at = updated_at;
            post.clone()
        }))
    }

    async fn delete(&self, id: PostId) -> Result<bool, MatchingRepositoryError> {
        let mut guard = self.lock().map_err(MatchingRepositoryError::query)?;
        let state = &mut *guard;
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.reviews.retain(|_, review| review.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl MatchingReviewRepository for InMemoryCommunityStore {
    async fn insert(
        &self,
        review: &NewReview,
    ) -> Result<MatchingPostReview, MatchingRepositoryError> {
        let mut guard = self.lock().map_err(MatchingRepositoryError::query)?;
        let state = &mut *guard;
        if !state.posts.contains_key(&review.post_id) {
            return Err(MatchingRepositoryError::post_missing(review.post_id.get()));
        }
        let id = ReviewId::new(next_id(&mut state.sequences.review));
        let stored = MatchingPostReview {
            id,
            post_id: review.post_id,
            author_id: review.author_id,
            content: review.content.clone(),
            created_at: review.created_at,
            updated_at: review.created_at,
        };
        state.reviews.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: ReviewId,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError> {
        let state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.reviews.get(&id).cloned())
    }

    async fn list_for_post(
        &self,
        post_id: PostId,
    ) -> Result<Vec<MatchingPostReview>, MatchingRepositoryError> {
        let state = self.lock().map_err(MatchingRepositoryError::query)?;
        let mut reviews: Vec<MatchingPostReview> = state
            .reviews
            .values()
            .filter(|review| review.post_id == post_id)
            .cloned()
            .collect();
        oldest_first(&mut reviews, |review| (review.created_at, review.id.get()));
        Ok(reviews)
    }

    async fn update_content(
        &self,
        id: ReviewId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<MatchingPostReview>, MatchingRepositoryError> {
        let mut state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.reviews.get_mut(&id).map(|review| {
            review.content = content.clone();
            review.updated_at = updated_at;
            review.clone()
        }))
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, MatchingRepositoryError> {
        let mut state = self.lock().map_err(MatchingRepositoryError::query)?;
        Ok(state.reviews.remove(&id).is_some())
    }
}
