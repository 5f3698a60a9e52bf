//! Question board HTTP handlers.
//!
//! ```text
//! POST /api/v1/questions {"title":"...","content":"...","department":"Physics","bonusExperience":10}
//! GET /api/v1/questions?page=0&department=Physics&status=OPEN&keyword=waves
//! GET /api/v1/questions/{id}
//! PUT /api/v1/questions/{id}
//! DELETE /api/v1/questions/{id}
//! ```
//!
//! Reads are public; mutations need a session.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Content, Department, Error, Page, PageRequest, Question, QuestionDetail, QuestionDraft,
    QuestionEdit, QuestionFilter, QuestionId, QuestionStatus, Title,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::answers::AnswerResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{non_blank, parse_status};

/// Request body for creating a question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub department: String,
    /// Extra experience promised to the accepted answer. Defaults to zero.
    #[serde(default)]
    pub bonus_experience: u32,
}

impl TryFrom<CreateQuestionRequest> for QuestionDraft {
    type Error = Error;

    fn try_from(value: CreateQuestionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: Title::new(value.title)?,
            content: Content::new(value.content)?,
            department: Department::new(value.department)?,
            bonus_experience: value.bonus_experience,
        })
    }
}

/// Request body for editing a question. The bonus cannot change.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub title: String,
    pub content: String,
    pub department: String,
}

impl TryFrom<UpdateQuestionRequest> for QuestionEdit {
    type Error = Error;

    fn try_from(value: UpdateQuestionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: Title::new(value.title)?,
            content: Content::new(value.content)?,
            department: Department::new(value.department)?,
        })
    }
}

/// Listing query string.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionListQuery {
    pub page: Option<u32>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub keyword: Option<String>,
}

impl TryFrom<QuestionListQuery> for QuestionFilter {
    type Error = Error;

    fn try_from(query: QuestionListQuery) -> Result<Self, Self::Error> {
        let department = non_blank(query.department)
            .map(Department::new)
            .transpose()?;
        Ok(Self {
            department,
            status: parse_status(query.status.as_deref())?,
            keyword: non_blank(query.keyword),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub author_id: i64,
    pub department: String,
    pub title: String,
    pub content: String,
    pub status: QuestionStatus,
    pub accepted_answer_id: Option<i64>,
    pub bonus_experience: u32,
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.get(),
            author_id: question.author_id.get(),
            department: question.department.into(),
            title: question.title.into(),
            content: question.content.into(),
            status: question.status,
            accepted_answer_id: question.accepted_answer_id.map(|id| id.get()),
            bonus_experience: question.bonus_experience,
            view_count: question.view_count,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// A question with its answers, oldest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub answers: Vec<AnswerResponse>,
}

impl From<QuestionDetail> for QuestionDetailResponse {
    fn from(detail: QuestionDetail) -> Self {
        Self {
            question: detail.question.into(),
            answers: detail.answers.into_iter().map(AnswerResponse::from).collect(),
        }
    }
}

/// One page of questions, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPageResponse {
    pub items: Vec<QuestionResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
}

impl From<Page<Question>> for QuestionPageResponse {
    fn from(page: Page<Question>) -> Self {
        let page = page.map(QuestionResponse::from);
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
        }
    }
}

/// Ask a question.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateQuestionRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let draft = QuestionDraft::try_from(payload.into_inner())?;
    let question = state.questions.create_question(author_id, draft).await?;
    Ok(HttpResponse::Created().json(QuestionResponse::from(question)))
}

/// List questions newest first.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page, ten items each"),
        ("department" = Option<String>, Query, description = "Exact department"),
        ("status" = Option<QuestionStatus>, Query, description = "OPEN or SOLVED"),
        ("keyword" = Option<String>, Query, description = "Case-insensitive title substring")
    ),
    responses(
        (status = 200, description = "Questions", body = QuestionPageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    query: web::Query<QuestionListQuery>,
) -> ApiResult<web::Json<QuestionPageResponse>> {
    let query = query.into_inner();
    let page = PageRequest::new(query.page.unwrap_or_default());
    let filter = QuestionFilter::try_from(query)?;
    let questions = state.questions_query.list_questions(filter, page).await?;
    Ok(web::Json(questions.into()))
}

/// Fetch a question with its answers. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question detail", body = QuestionDetailResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<QuestionDetailResponse>> {
    let question_id = QuestionId::new(path.into_inner());
    let detail = state.questions_query.get_question(question_id).await?;
    Ok(web::Json(detail.into()))
}

/// Edit a question. Author only.
#[utoipa::path(
    put,
    path = "/api/v1/questions/{id}",
    request_body = UpdateQuestionRequest,
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "updateQuestion"
)]
#[put("/questions/{id}")]
pub async fn update_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdateQuestionRequest>,
) -> ApiResult<web::Json<QuestionResponse>> {
    let caller_id = session.require_user_id()?;
    let edit = QuestionEdit::try_from(payload.into_inner())?;
    let question = state
        .questions
        .update_question(QuestionId::new(path.into_inner()), caller_id, edit)
        .await?;
    Ok(web::Json(question.into()))
}

/// Delete a question and its answers. Author only.
#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller_id = session.require_user_id()?;
    state
        .questions
        .delete_question(QuestionId::new(path.into_inner()), caller_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
