//! Answers posted to questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, Content, QuestionId, UserId};

/// An answer to a question.
///
/// `accepted` is true for at most one answer per question, and only for the
/// answer recorded as that question's accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Store-assigned identifier.
    pub id: AnswerId,
    /// Question being answered.
    pub question_id: QuestionId,
    /// Answerer.
    pub author_id: UserId,
    /// Body.
    pub content: Content,
    /// Whether the question author accepted this answer.
    pub accepted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Answer fields handed to storage on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    /// Question being answered.
    pub question_id: QuestionId,
    /// Answerer.
    pub author_id: UserId,
    /// Body.
    pub content: Content,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
