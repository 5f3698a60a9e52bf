//! Tests for the matching board service.

use std::sync::Arc;

use super::*;
use crate::domain::authorship::MISMATCH_AUTHOR;
use crate::domain::ports::{
    MockMatchingPostRepository, MockMatchingReviewRepository, MockUserRepository,
};
use crate::domain::test_fixtures::{content, fixture_clock, post, review, user};
use crate::domain::{ErrorCode, MatchingPostStatus};

type Service = MatchingBoardService<
    MockMatchingPostRepository,
    MockMatchingReviewRepository,
    MockUserRepository,
>;

fn make_service(
    posts: MockMatchingPostRepository,
    reviews: MockMatchingReviewRepository,
    users: MockUserRepository,
) -> Service {
    MatchingBoardService::new(
        Arc::new(posts),
        Arc::new(reviews),
        Arc::new(users),
        fixture_clock(),
    )
}

fn posts_returning(found: Option<MatchingPost>) -> MockMatchingPostRepository {
    let mut posts = MockMatchingPostRepository::new();
    posts
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(found));
    posts
}

fn reviews_returning(found: Option<MatchingPostReview>) -> MockMatchingReviewRepository {
    let mut reviews = MockMatchingReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(found));
    reviews
}

fn completed_edit() -> MatchingPostEdit {
    MatchingPostEdit {
        category: Category::new("project").expect("category"),
        status: MatchingPostStatus::RecruitmentCompleted,
        title: Title::new("Team formed").expect("title"),
        content: content("Thanks, we are full."),
    }
}

#[tokio::test]
async fn create_post_starts_recruiting() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user(1))));
    let mut posts = MockMatchingPostRepository::new();
    posts
        .expect_insert()
        .withf(|new_post| new_post.author_id == UserId::new(1))
        .times(1)
        .return_once(|_| Ok(post(1, 1)));

    let created = make_service(posts, MockMatchingReviewRepository::new(), users)
        .create_post(
            UserId::new(1),
            Category::new("study").expect("category"),
            Title::new("Algorithms study group").expect("title"),
            content("Weekly sessions on Thursdays."),
        )
        .await
        .expect("post created");

    assert_eq!(created.status, MatchingPostStatus::Recruiting);
}

#[tokio::test]
async fn update_post_by_author_changes_status() {
    let mut posts = posts_returning(Some(post(1, 1)));
    posts
        .expect_update()
        .times(1)
        .return_once(|_, edit, _| {
            let mut updated = post(1, 1);
            updated.status = edit.status;
            Ok(Some(updated))
        });

    let updated = make_service(
        posts,
        MockMatchingReviewRepository::new(),
        MockUserRepository::new(),
    )
    .update_post(PostId::new(1), UserId::new(1), completed_edit())
    .await
    .expect("author may edit");

    assert_eq!(updated.status, MatchingPostStatus::RecruitmentCompleted);
}

#[tokio::test]
async fn update_post_by_other_user_is_forbidden() {
    let mut posts = posts_returning(Some(post(1, 1)));
    posts.expect_update().never();

    let error = make_service(
        posts,
        MockMatchingReviewRepository::new(),
        MockUserRepository::new(),
    )
    .update_post(PostId::new(1), UserId::new(2), completed_edit())
    .await
    .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.reason(), Some(MISMATCH_AUTHOR));
}

#[tokio::test]
async fn get_post_counts_view() {
    let mut posts = MockMatchingPostRepository::new();
    posts.expect_record_view().times(1).return_once(|_| {
        let mut viewed = post(1, 1);
        viewed.view_count = 4;
        Ok(Some(viewed))
    });

    let found = make_service(
        posts,
        MockMatchingReviewRepository::new(),
        MockUserRepository::new(),
    )
    .get_post(PostId::new(1))
    .await
    .expect("post loads");

    assert_eq!(found.view_count, 4);
}

#[tokio::test]
async fn create_review_on_missing_post_is_not_found() {
    let posts = posts_returning(None);
    let mut reviews = MockMatchingReviewRepository::new();
    reviews.expect_insert().never();

    let error = make_service(posts, reviews, MockUserRepository::new())
        .create_review(PostId::new(404), UserId::new(2), content("Great"))
        .await
        .expect_err("missing post");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_review_maps_vanished_post() {
    let posts = posts_returning(Some(post(1, 1)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user(2))));
    let mut reviews = MockMatchingReviewRepository::new();
    reviews
        .expect_insert()
        .times(1)
        .return_once(|_| Err(MatchingRepositoryError::post_missing(1_i64)));

    let error = make_service(posts, reviews, users)
        .create_review(PostId::new(1), UserId::new(2), content("Great"))
        .await
        .expect_err("post deleted concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_review_by_other_user_is_forbidden() {
    let mut reviews = reviews_returning(Some(review(5, 1, 2)));
    reviews.expect_delete().never();

    let error = make_service(
        MockMatchingPostRepository::new(),
        reviews,
        MockUserRepository::new(),
    )
    .delete_review(ReviewId::new(5), UserId::new(3))
    .await
    .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_review_by_author_replaces_content() {
    let mut reviews = reviews_returning(Some(review(5, 1, 2)));
    reviews
        .expect_update_content()
        .times(1)
        .return_once(|_, text, _| {
            let mut updated = review(5, 1, 2);
            updated.content = text.clone();
            Ok(Some(updated))
        });

    let updated = make_service(
        MockMatchingPostRepository::new(),
        reviews,
        MockUserRepository::new(),
    )
    .update_review(ReviewId::new(5), UserId::new(2), content("Even better"))
    .await
    .expect("author may edit");

    assert_eq!(updated.content.as_str(), "Even better");
}

#[tokio::test]
async fn list_reviews_requires_post() {
    let posts = posts_returning(None);
    let mut reviews = MockMatchingReviewRepository::new();
    reviews.expect_list_for_post().never();

    let error = make_service(posts, reviews, MockUserRepository::new())
        .list_reviews(PostId::new(404))
        .await
        .expect_err("missing post");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
