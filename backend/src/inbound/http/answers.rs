//! Answer workflow HTTP handlers.
//!
//! ```text
//! POST /api/v1/questions/{id}/answers {"content":"..."}
//! PUT /api/v1/answers/{id} {"content":"..."}
//! DELETE /api/v1/answers/{id}
//! POST /api/v1/questions/{id}/answers/{answerId}/accept
//! ```

use actix_web::{HttpResponse, delete, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Answer, AnswerId, Content, Error, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::questions::QuestionResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for creating or editing an answer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub content: String,
}

impl TryFrom<AnswerRequest> for Content {
    type Error = Error;

    fn try_from(value: AnswerRequest) -> Result<Self, Self::Error> {
        Ok(Content::new(value.content)?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub content: String,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id.get(),
            question_id: answer.question_id.get(),
            author_id: answer.author_id.get(),
            content: answer.content.into(),
            accepted: answer.accepted,
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}

/// Answer a question. The answerer earns the posting award.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/answers",
    request_body = AnswerRequest,
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 201, description = "Answer created", body = AnswerResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Question not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
#[post("/questions/{id}/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<AnswerRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let content = Content::try_from(payload.into_inner())?;
    let answer = state
        .answers
        .create_answer(QuestionId::new(path.into_inner()), author_id, content)
        .await?;
    Ok(HttpResponse::Created().json(AnswerResponse::from(answer)))
}

/// Replace an answer's content. Author only.
#[utoipa::path(
    put,
    path = "/api/v1/answers/{id}",
    request_body = AnswerRequest,
    params(("id" = i64, Path, description = "Answer identifier")),
    responses(
        (status = 200, description = "Updated answer", body = AnswerResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["answers"],
    operation_id = "updateAnswer"
)]
#[put("/answers/{id}")]
pub async fn update_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<AnswerRequest>,
) -> ApiResult<web::Json<AnswerResponse>> {
    let caller_id = session.require_user_id()?;
    let content = Content::try_from(payload.into_inner())?;
    let answer = state
        .answers
        .update_answer(AnswerId::new(path.into_inner()), caller_id, content)
        .await?;
    Ok(web::Json(answer.into()))
}

/// Delete an answer. Author only; the accepted answer cannot be deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/answers/{id}",
    params(("id" = i64, Path, description = "Answer identifier")),
    responses(
        (status = 204, description = "Answer deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Answer is accepted", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["answers"],
    operation_id = "deleteAnswer"
)]
#[delete("/answers/{id}")]
pub async fn delete_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller_id = session.require_user_id()?;
    state
        .answers
        .delete_answer(AnswerId::new(path.into_inner()), caller_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Accept an answer, solving the question. Question author only, once.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/answers/{answer_id}/accept",
    params(
        ("id" = i64, Path, description = "Question identifier"),
        ("answer_id" = i64, Path, description = "Answer identifier")
    ),
    responses(
        (status = 200, description = "Solved question", body = QuestionResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the question author", body = Error),
        (status = 404, description = "Question or answer not found", body = Error),
        (status = 409, description = "An answer was already accepted", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["answers"],
    operation_id = "acceptAnswer"
)]
#[post("/questions/{id}/answers/{answer_id}/accept")]
pub async fn accept_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<QuestionResponse>> {
    let caller_id = session.require_user_id()?;
    let (question_id, answer_id) = path.into_inner();
    let question = state
        .answers
        .accept_answer(
            QuestionId::new(question_id),
            AnswerId::new(answer_id),
            caller_id,
        )
        .await?;
    Ok(web::Json(question.into()))
}

#[cfg(test)]
#[path = "answers_tests.rs"]
mod tests;
