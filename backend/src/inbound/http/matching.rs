//! Matching board HTTP handlers.
//!
//! ```text
//! POST /api/v1/matching-posts {"category":"study","title":"...","content":"..."}
//! GET /api/v1/matching-posts?page=0&category=study
//! GET|PUT|DELETE /api/v1/matching-posts/{id}
//! POST|GET /api/v1/matching-posts/{id}/reviews
//! PUT|DELETE /api/v1/reviews/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Category, Content, Error, MatchingPost, MatchingPostEdit, MatchingPostReview,
    MatchingPostStatus, Page, PageRequest, PostId, ReviewId, Title,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::non_blank;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub category: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub category: String,
    pub status: MatchingPostStatus,
    pub title: String,
    pub content: String,
}

impl TryFrom<UpdatePostRequest> for MatchingPostEdit {
    type Error = Error;

    fn try_from(value: UpdatePostRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: Category::new(value.category)?,
            status: value.status,
            title: Title::new(value.title)?,
            content: Content::new(value.content)?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub page: Option<u32>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPostResponse {
    pub id: i64,
    pub author_id: i64,
    pub category: String,
    pub status: MatchingPostStatus,
    pub title: String,
    pub content: String,
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchingPost> for MatchingPostResponse {
    fn from(post: MatchingPost) -> Self {
        Self {
            id: post.id.get(),
            author_id: post.author_id.get(),
            category: post.category.into(),
            status: post.status,
            title: post.title.into(),
            content: post.content.into(),
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPostPageResponse {
    pub items: Vec<MatchingPostResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
}

impl From<Page<MatchingPost>> for MatchingPostPageResponse {
    fn from(page: Page<MatchingPost>) -> Self {
        let page = page.map(MatchingPostResponse::from);
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchingPostReview> for ReviewResponse {
    fn from(review: MatchingPostReview) -> Self {
        Self {
            id: review.id.get(),
            post_id: review.post_id.get(),
            author_id: review.author_id.get(),
            content: review.content.into(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Publish a recruiting post.
#[utoipa::path(
    post,
    path = "/api/v1/matching-posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = MatchingPostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "createMatchingPost"
)]
#[post("/matching-posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let CreatePostRequest {
        category,
        title,
        content,
    } = payload.into_inner();
    let post = state
        .matching
        .create_post(
            author_id,
            Category::new(category)?,
            Title::new(title)?,
            Content::new(content)?,
        )
        .await?;
    Ok(HttpResponse::Created().json(MatchingPostResponse::from(post)))
}

/// List posts newest first.
#[utoipa::path(
    get,
    path = "/api/v1/matching-posts",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page, ten items each"),
        ("category" = Option<String>, Query, description = "Exact category")
    ),
    responses(
        (status = 200, description = "Posts", body = MatchingPostPageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "listMatchingPosts",
    security([])
)]
#[get("/matching-posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<PostListQuery>,
) -> ApiResult<web::Json<MatchingPostPageResponse>> {
    let PostListQuery { page, category } = query.into_inner();
    let category = non_blank(category).map(Category::new).transpose()?;
    let posts = state
        .matching_query
        .list_posts(category, PageRequest::new(page.unwrap_or_default()))
        .await?;
    Ok(web::Json(posts.into()))
}

/// Fetch a post. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/v1/matching-posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = MatchingPostResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "getMatchingPost",
    security([])
)]
#[get("/matching-posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MatchingPostResponse>> {
    let post = state
        .matching_query
        .get_post(PostId::new(path.into_inner()))
        .await?;
    Ok(web::Json(post.into()))
}

/// Edit a post. Author only.
#[utoipa::path(
    put,
    path = "/api/v1/matching-posts/{id}",
    request_body = UpdatePostRequest,
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Updated post", body = MatchingPostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "updateMatchingPost"
)]
#[put("/matching-posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<MatchingPostResponse>> {
    let caller_id = session.require_user_id()?;
    let edit = MatchingPostEdit::try_from(payload.into_inner())?;
    let post = state
        .matching
        .update_post(PostId::new(path.into_inner()), caller_id, edit)
        .await?;
    Ok(web::Json(post.into()))
}

/// Delete a post and its reviews. Author only.
#[utoipa::path(
    delete,
    path = "/api/v1/matching-posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "deleteMatchingPost"
)]
#[delete("/matching-posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller_id = session.require_user_id()?;
    state
        .matching
        .delete_post(PostId::new(path.into_inner()), caller_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Review a post.
#[utoipa::path(
    post,
    path = "/api/v1/matching-posts/{id}/reviews",
    request_body = ReviewRequest,
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "createReview"
)]
#[post("/matching-posts/{id}/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let content = Content::new(payload.into_inner().content)?;
    let review = state
        .matching
        .create_review(PostId::new(path.into_inner()), author_id, content)
        .await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// List a post's reviews, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/matching-posts/{id}/reviews",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Reviews", body = [ReviewResponse]),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "listReviews",
    security([])
)]
#[get("/matching-posts/{id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let reviews = state
        .matching_query
        .list_reviews(PostId::new(path.into_inner()))
        .await?;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// Edit a review. Author only.
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    request_body = ReviewRequest,
    params(("id" = i64, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "updateReview"
)]
#[put("/reviews/{id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let caller_id = session.require_user_id()?;
    let content = Content::new(payload.into_inner().content)?;
    let review = state
        .matching
        .update_review(ReviewId::new(path.into_inner()), caller_id, content)
        .await?;
    Ok(web::Json(review.into()))
}

/// Delete a review. Author only.
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review identifier")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["matching"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller_id = session.require_user_id()?;
    state
        .matching
        .delete_review(ReviewId::new(path.into_inner()), caller_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
