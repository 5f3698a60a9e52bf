//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types are
//! fallible because stored text is re-validated on the way out; failures are
//! reported as plain messages that each repository wraps in its own query
//! error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Answer, AnswerId, AwardCause, Category, Content, Department, Email, ExperienceAward,
    MatchingPost, MatchingPostReview, MatchingPostStatus, Nickname, PersonName, PostId, Question,
    QuestionId, QuestionStatus, ReviewId, StudentNo, Title, User, UserId,
};

use super::schema::{
    answers, experience_awards, matching_post_reviews, matching_posts, questions, users,
};

fn stored<T, E: std::fmt::Display>(result: Result<T, E>, column: &str) -> Result<T, String> {
    result.map_err(|err| format!("invalid stored {column}: {err}"))
}

fn stored_count(value: i32, column: &str) -> Result<u32, String> {
    stored(u32::try_from(value), column)
}

/// Clamp a domain counter into a signed column.
pub(crate) fn to_db_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub nickname: String,
    pub student_no: String,
    pub department: String,
    pub answer_count: i32,
    pub accept_count: i32,
    pub experience: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id),
            email: stored(Email::new(row.email), "email")?,
            name: stored(PersonName::new(row.name), "name")?,
            nickname: stored(Nickname::new(row.nickname), "nickname")?,
            student_no: stored(StudentNo::new(row.student_no), "student_no")?,
            department: stored(Department::new(row.department), "department")?,
            answer_count: stored_count(row.answer_count, "answer_count")?,
            accept_count: stored_count(row.accept_count, "accept_count")?,
            experience: stored(u64::try_from(row.experience), "experience")?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub nickname: &'a str,
    pub student_no: &'a str,
    pub department: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Questions and answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: i64,
    pub author_id: i64,
    pub department: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub accepted_answer_id: Option<i64>,
    pub bonus_experience: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = String;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuestionId::new(row.id),
            author_id: UserId::new(row.author_id),
            department: stored(Department::new(row.department), "department")?,
            title: stored(Title::new(row.title), "title")?,
            content: stored(Content::new(row.content), "content")?,
            status: stored(row.status.parse::<QuestionStatus>(), "status")?,
            accepted_answer_id: row.accepted_answer_id.map(AnswerId::new),
            bonus_experience: stored_count(row.bonus_experience, "bonus_experience")?,
            view_count: stored_count(row.view_count, "view_count")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub author_id: i64,
    pub department: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub status: &'a str,
    pub bonus_experience: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionUpdate<'a> {
    pub department: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub content: String,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = String;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AnswerId::new(row.id),
            question_id: QuestionId::new(row.question_id),
            author_id: UserId::new(row.author_id),
            content: stored(Content::new(row.content), "content")?,
            accepted: row.accepted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub question_id: i64,
    pub author_id: i64,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Experience ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = experience_awards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExperienceAwardRow {
    pub actor_id: i64,
    pub beneficiary_id: i64,
    pub amount: i32,
    pub cause: String,
    pub question_id: i64,
    pub answer_id: i64,
    pub awarded_at: DateTime<Utc>,
}

impl TryFrom<ExperienceAwardRow> for ExperienceAward {
    type Error = String;

    fn try_from(row: ExperienceAwardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            actor_id: UserId::new(row.actor_id),
            beneficiary_id: UserId::new(row.beneficiary_id),
            amount: stored_count(row.amount, "amount")?,
            cause: stored(row.cause.parse::<AwardCause>(), "cause")?,
            question_id: QuestionId::new(row.question_id),
            answer_id: AnswerId::new(row.answer_id),
            awarded_at: row.awarded_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = experience_awards)]
pub(crate) struct NewExperienceAwardRow<'a> {
    pub actor_id: i64,
    pub beneficiary_id: i64,
    pub amount: i32,
    pub cause: &'a str,
    pub question_id: i64,
    pub answer_id: i64,
    pub awarded_at: DateTime<Utc>,
}

impl<'a> From<&'a ExperienceAward> for NewExperienceAwardRow<'a> {
    fn from(award: &'a ExperienceAward) -> Self {
        Self {
            actor_id: award.actor_id.get(),
            beneficiary_id: award.beneficiary_id.get(),
            amount: to_db_count(award.amount),
            cause: award.cause.as_str(),
            question_id: award.question_id.get(),
            answer_id: award.answer_id.get(),
            awarded_at: award.awarded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Matching board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = matching_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MatchingPostRow {
    pub id: i64,
    pub author_id: i64,
    pub category: String,
    pub status: String,
    pub title: String,
    pub content: String,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MatchingPostRow> for MatchingPost {
    type Error = String;

    fn try_from(row: MatchingPostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::new(row.id),
            author_id: UserId::new(row.author_id),
            category: stored(Category::new(row.category), "category")?,
            status: stored(row.status.parse::<MatchingPostStatus>(), "status")?,
            title: stored(Title::new(row.title), "title")?,
            content: stored(Content::new(row.content), "content")?,
            view_count: stored_count(row.view_count, "view_count")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = matching_posts)]
pub(crate) struct NewMatchingPostRow<'a> {
    pub author_id: i64,
    pub category: &'a str,
    pub status: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = matching_posts)]
pub(crate) struct MatchingPostUpdate<'a> {
    pub category: &'a str,
    pub status: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = matching_post_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for MatchingPostReview {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::new(row.id),
            post_id: PostId::new(row.post_id),
            author_id: UserId::new(row.author_id),
            content: stored(Content::new(row.content), "content")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = matching_post_reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub post_id: i64,
    pub author_id: i64,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert a batch of rows, failing on the first invalid one.
pub(crate) fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, String>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter().map(T::try_from).collect()
}
