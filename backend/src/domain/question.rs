//! Question board entities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{AnswerId, Answer, Content, Department, QuestionId, Title, UserId};

/// Lifecycle of a question. `Solved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    /// Awaiting an accepted answer.
    Open,
    /// An answer has been accepted.
    Solved,
}

impl QuestionStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Solved => "solved",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or requested status is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question status: {0}")]
pub struct UnknownQuestionStatus(pub String);

impl FromStr for QuestionStatus {
    type Err = UnknownQuestionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "solved" => Ok(Self::Solved),
            _ => Err(UnknownQuestionStatus(s.to_owned())),
        }
    }
}

/// A question posted on the board.
///
/// `accepted_answer_id.is_some()` holds exactly when `status` is
/// [`QuestionStatus::Solved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Store-assigned identifier.
    pub id: QuestionId,
    /// Asker.
    pub author_id: UserId,
    /// Department the question is filed under.
    pub department: Department,
    /// Headline.
    pub title: Title,
    /// Body.
    pub content: Content,
    /// Lifecycle state.
    pub status: QuestionStatus,
    /// Accepted answer once solved.
    pub accepted_answer_id: Option<AnswerId>,
    /// Extra points granted on acceptance, fixed at creation.
    pub bonus_experience: u32,
    /// Times the question detail was viewed.
    pub view_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Whether an answer has already been accepted.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.accepted_answer_id.is_some()
    }
}

/// Fields supplied when asking a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Headline.
    pub title: Title,
    /// Body.
    pub content: Content,
    /// Department the question is filed under.
    pub department: Department,
    /// Extra points offered for the accepted answer.
    pub bonus_experience: u32,
}

/// Draft plus ownership and timestamp, as handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    /// Asker.
    pub author_id: UserId,
    /// Author-supplied fields.
    pub draft: QuestionDraft,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Editable question fields. The bonus cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEdit {
    /// New headline.
    pub title: Title,
    /// New body.
    pub content: Content,
    /// New department.
    pub department: Department,
}

/// Listing filters; all present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Exact department match.
    pub department: Option<Department>,
    /// Exact status match.
    pub status: Option<QuestionStatus>,
    /// Case-insensitive substring of the title.
    pub keyword: Option<String>,
}

impl QuestionFilter {
    /// Evaluate the filter against a question.
    ///
    /// # Examples
    /// ```
    /// use titto_backend::domain::{QuestionFilter, QuestionStatus};
    ///
    /// let filter = QuestionFilter {
    ///     status: Some(QuestionStatus::Open),
    ///     ..QuestionFilter::default()
    /// };
    /// assert!(filter.keyword.is_none());
    /// ```
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        let department_ok = self
            .department
            .as_ref()
            .is_none_or(|department| *department == question.department);
        let status_ok = self.status.is_none_or(|status| status == question.status);
        let keyword_ok = self.keyword.as_deref().is_none_or(|keyword| {
            question
                .title
                .as_str()
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        });
        department_ok && status_ok && keyword_ok
    }
}

/// A question together with its answers, oldest answer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    /// The question.
    pub question: Question,
    /// Its answers.
    pub answers: Vec<Answer>,
}
