//! Handler tests for the matching board endpoints.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{api_app, memory_state, send_json, signup_cookie};

fn post_body(category: &str) -> Value {
    json!({
        "category": category,
        "title": "Looking for a study partner",
        "content": "Weekly sessions on distributed systems.",
    })
}

#[rstest]
#[actix_web::test]
async fn post_lifecycle_with_reviews() {
    let app = test::init_service(api_app(memory_state())).await;
    let author = signup_cookie(&app, "ada").await;
    let reviewer = signup_cookie(&app, "grace").await;

    let res = send_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matching-posts"),
        Some(&author),
        Some(post_body("study")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let post: MatchingPostResponse = test::read_body_json(res).await;
    assert_eq!(post.status, MatchingPostStatus::Recruiting);
    let post_uri = format!("/api/v1/matching-posts/{}", post.id);
    let reviews_uri = format!("{post_uri}/reviews");

    let review = send_json(
        &app,
        test::TestRequest::post().uri(&reviews_uri),
        Some(&reviewer),
        Some(json!({ "content": "Great organiser." })),
    )
    .await;
    assert_eq!(review.status(), StatusCode::CREATED);

    let listed = send_json(&app, test::TestRequest::get().uri(&reviews_uri), None, None).await;
    let reviews: Vec<ReviewResponse> = test::read_body_json(listed).await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].content, "Great organiser.");

    let completed = send_json(
        &app,
        test::TestRequest::put().uri(&post_uri),
        Some(&author),
        Some(json!({
            "category": "study",
            "status": "RECRUITMENT_COMPLETED",
            "title": "Study partner found",
            "content": "Thanks everyone.",
        })),
    )
    .await;
    assert_eq!(completed.status(), StatusCode::OK);
    let updated: MatchingPostResponse = test::read_body_json(completed).await;
    assert_eq!(updated.status, MatchingPostStatus::RecruitmentCompleted);

    let deleted = send_json(&app, test::TestRequest::delete().uri(&post_uri), Some(&author), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send_json(&app, test::TestRequest::get().uri(&reviews_uri), None, None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn listing_filters_by_category() {
    let app = test::init_service(api_app(memory_state())).await;
    let author = signup_cookie(&app, "ada").await;
    for category in ["study", "sports", "study"] {
        send_json(
            &app,
            test::TestRequest::post().uri("/api/v1/matching-posts"),
            Some(&author),
            Some(post_body(category)),
        )
        .await;
    }

    let res = send_json(
        &app,
        test::TestRequest::get().uri("/api/v1/matching-posts?category=study"),
        None,
        None,
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let page: MatchingPostPageResponse = test::read_body_json(res).await;
    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|post| post.category == "study"));
}

#[rstest]
#[actix_web::test]
async fn viewing_a_post_counts() {
    let app = test::init_service(api_app(memory_state())).await;
    let author = signup_cookie(&app, "ada").await;
    let res = send_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matching-posts"),
        Some(&author),
        Some(post_body("study")),
    )
    .await;
    let post: MatchingPostResponse = test::read_body_json(res).await;
    let uri = format!("/api/v1/matching-posts/{}", post.id);

    send_json(&app, test::TestRequest::get().uri(&uri), None, None).await;
    let second = send_json(&app, test::TestRequest::get().uri(&uri), None, None).await;

    let viewed: MatchingPostResponse = test::read_body_json(second).await;
    assert_eq!(viewed.view_count, 2);
}

#[rstest]
#[actix_web::test]
async fn only_the_reviewer_may_change_a_review() {
    let app = test::init_service(api_app(memory_state())).await;
    let author = signup_cookie(&app, "ada").await;
    let reviewer = signup_cookie(&app, "grace").await;
    let res = send_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matching-posts"),
        Some(&author),
        Some(post_body("study")),
    )
    .await;
    let post: MatchingPostResponse = test::read_body_json(res).await;
    let res = send_json(
        &app,
        test::TestRequest::post().uri(&format!("/api/v1/matching-posts/{}/reviews", post.id)),
        Some(&reviewer),
        Some(json!({ "content": "Punctual." })),
    )
    .await;
    let review: ReviewResponse = test::read_body_json(res).await;
    let uri = format!("/api/v1/reviews/{}", review.id);

    let denied = send_json(&app, test::TestRequest::delete().uri(&uri), Some(&author), None).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(denied).await;
    assert_eq!(body["details"]["code"], "mismatch_author");

    let edited = send_json(
        &app,
        test::TestRequest::put().uri(&uri),
        Some(&reviewer),
        Some(json!({ "content": "Punctual and prepared." })),
    )
    .await;
    assert_eq!(edited.status(), StatusCode::OK);

    let deleted = send_json(&app, test::TestRequest::delete().uri(&uri), Some(&reviewer), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn reviewing_a_missing_post_is_not_found() {
    let app = test::init_service(api_app(memory_state())).await;
    let reviewer = signup_cookie(&app, "grace").await;

    let res = send_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matching-posts/404/reviews"),
        Some(&reviewer),
        Some(json!({ "content": "Hello?" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
