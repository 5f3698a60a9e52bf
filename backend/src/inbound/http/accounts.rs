//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/signup {"email":"ada@titto.ac.kr","name":"Ada","nickname":"ada","studentNo":"20240001","department":"Physics"}
//! POST /api/v1/login {"email":"ada@titto.ac.kr"}
//! GET /api/v1/users/me
//! GET /api/v1/users/me/experience
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AwardCause, Department, Email, Error, ExperienceAward, ExperienceHistory, NewUser, Nickname,
    PersonName, StudentNo, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/signup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub nickname: String,
    pub student_no: String,
    pub department: String,
}

impl TryFrom<SignupRequest> for NewUser {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: Email::new(value.email)?,
            name: PersonName::new(value.name)?,
            nickname: Nickname::new(value.nickname)?,
            student_no: StudentNo::new(value.student_no)?,
            department: Department::new(value.department)?,
        })
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
}

/// A user profile with reputation counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub nickname: String,
    pub student_no: String,
    pub department: String,
    pub answer_count: u32,
    pub accept_count: u32,
    pub experience: u64,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            email: user.email.into(),
            name: user.name.into(),
            nickname: user.nickname.into(),
            student_no: user.student_no.into(),
            department: user.department.into(),
            answer_count: user.answer_count,
            accept_count: user.accept_count,
            experience: user.experience,
            created_at: user.created_at,
        }
    }
}

/// One ledger entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardResponse {
    pub actor_id: i64,
    pub amount: u32,
    pub cause: AwardCause,
    pub question_id: i64,
    pub answer_id: i64,
    pub awarded_at: DateTime<Utc>,
}

impl From<ExperienceAward> for AwardResponse {
    fn from(award: ExperienceAward) -> Self {
        Self {
            actor_id: award.actor_id.get(),
            amount: award.amount,
            cause: award.cause,
            question_id: award.question_id.get(),
            answer_id: award.answer_id.get(),
            awarded_at: award.awarded_at,
        }
    }
}

/// The caller's awards, newest first, and their total.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceHistoryResponse {
    pub user_id: i64,
    pub total: u64,
    pub awards: Vec<AwardResponse>,
}

impl From<ExperienceHistory> for ExperienceHistoryResponse {
    fn from(history: ExperienceHistory) -> Self {
        Self {
            user_id: history.user_id.get(),
            total: history.total,
            awards: history.awards.into_iter().map(AwardResponse::from).collect(),
        }
    }
}

/// Register a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "E-mail already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let profile = NewUser::try_from(payload.into_inner())?;
    let user = state.accounts.signup(profile).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Resolve an e-mail to a registered user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown e-mail", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let email = Email::new(payload.into_inner().email)?;
    let user = state.accounts.login(&email).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts_query.profile(user_id).await?;
    Ok(web::Json(user.into()))
}

/// Fetch the caller's experience history.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/experience",
    responses(
        (status = 200, description = "Award history", body = ExperienceHistoryResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "experienceHistory"
)]
#[get("/users/me/experience")]
pub async fn experience_history(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ExperienceHistoryResponse>> {
    let user_id = session.require_user_id()?;
    let history = state.accounts_query.experience_history(user_id).await?;
    Ok(web::Json(history.into()))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
