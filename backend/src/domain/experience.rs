//! Experience ledger.
//!
//! Experience is never mutated in place by callers. The workflow computes an
//! immutable [`ExperienceAward`] and hands it to a driven port, which persists
//! the event and adds its amount to the beneficiary's materialised total in
//! the same unit of work. The total therefore always equals
//! [`total_experience`] over the user's history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{Answer, AnswerId, Question, QuestionId, UserId};

/// Points credited to an answerer for posting an answer.
pub const ANSWER_POSTED_POINTS: u32 = 5;
/// Points credited to an answerer when their answer is accepted, before the
/// question's bonus.
pub const ANSWER_ACCEPTED_BASE_POINTS: u32 = 35;
/// Upper bound on the bonus a question may offer.
pub const MAX_BONUS_EXPERIENCE: u32 = 10_000;

/// Why experience was awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardCause {
    /// An answer was posted.
    AnswerPosted,
    /// An answer was accepted.
    AnswerAccepted,
}

impl AwardCause {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnswerPosted => "answer_posted",
            Self::AnswerAccepted => "answer_accepted",
        }
    }
}

impl fmt::Display for AwardCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored award cause is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown award cause: {0}")]
pub struct UnknownAwardCause(pub String);

impl FromStr for AwardCause {
    type Err = UnknownAwardCause;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "answer_posted" => Ok(Self::AnswerPosted),
            "answer_accepted" => Ok(Self::AnswerAccepted),
            other => Err(UnknownAwardCause(other.to_owned())),
        }
    }
}

/// An award whose answer has not been stored yet.
///
/// Produced when an answer is created; the storage adapter binds it to the
/// new answer id with [`AwardDraft::for_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardDraft {
    /// User the points are attributed to.
    pub actor_id: UserId,
    /// User receiving the points.
    pub beneficiary_id: UserId,
    /// Points awarded.
    pub amount: u32,
    /// Reason for the award.
    pub cause: AwardCause,
    /// Question the award relates to.
    pub question_id: QuestionId,
    /// Award timestamp.
    pub awarded_at: DateTime<Utc>,
}

impl AwardDraft {
    /// Bind the draft to the stored answer.
    #[must_use]
    pub fn for_answer(self, answer_id: AnswerId) -> ExperienceAward {
        ExperienceAward {
            actor_id: self.actor_id,
            beneficiary_id: self.beneficiary_id,
            amount: self.amount,
            cause: self.cause,
            question_id: self.question_id,
            answer_id,
            awarded_at: self.awarded_at,
        }
    }
}

/// Immutable record of experience moving from an actor to a beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAward {
    /// User the points are attributed to.
    pub actor_id: UserId,
    /// User receiving the points.
    pub beneficiary_id: UserId,
    /// Points awarded.
    pub amount: u32,
    /// Reason for the award.
    pub cause: AwardCause,
    /// Question the award relates to.
    pub question_id: QuestionId,
    /// Answer the award relates to.
    pub answer_id: AnswerId,
    /// Award timestamp.
    pub awarded_at: DateTime<Utc>,
}

/// Points for an accepted answer: the base plus the question's bonus.
///
/// # Examples
/// ```
/// use titto_backend::domain::experience::accepted_points;
///
/// assert_eq!(accepted_points(10), 45);
/// assert_eq!(accepted_points(u32::MAX), u32::MAX);
/// ```
#[must_use]
pub const fn accepted_points(bonus_experience: u32) -> u32 {
    ANSWER_ACCEPTED_BASE_POINTS.saturating_add(bonus_experience)
}

/// Award for posting an answer: the question author credits the answerer.
#[must_use]
pub fn answer_posted(
    question: &Question,
    answer_author_id: UserId,
    awarded_at: DateTime<Utc>,
) -> AwardDraft {
    AwardDraft {
        actor_id: question.author_id,
        beneficiary_id: answer_author_id,
        amount: ANSWER_POSTED_POINTS,
        cause: AwardCause::AnswerPosted,
        question_id: question.id,
        awarded_at,
    }
}

/// Award for an accepted answer: the question author credits the answerer
/// with the base points plus the question's bonus.
#[must_use]
pub fn answer_accepted(
    question: &Question,
    answer: &Answer,
    awarded_at: DateTime<Utc>,
) -> ExperienceAward {
    ExperienceAward {
        actor_id: question.author_id,
        beneficiary_id: answer.author_id,
        amount: accepted_points(question.bonus_experience),
        cause: AwardCause::AnswerAccepted,
        question_id: question.id,
        answer_id: answer.id,
        awarded_at,
    }
}

/// Add an award to a running total without overflowing.
#[must_use]
pub const fn credit(total: u64, amount: u32) -> u64 {
    total.saturating_add(amount as u64)
}

/// Fold an award history into a total.
pub fn total_experience<'a>(awards: impl IntoIterator<Item = &'a ExperienceAward>) -> u64 {
    awards
        .into_iter()
        .fold(0, |total, award| credit(total, award.amount))
}

/// A user's awards, newest first, with their folded total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceHistory {
    /// Beneficiary of every award in the history.
    pub user_id: UserId,
    /// Fold of `awards`.
    pub total: u64,
    /// Awards, newest first.
    pub awards: Vec<ExperienceAward>,
}

impl ExperienceHistory {
    /// Build a history, ordering awards newest first and folding the total.
    #[must_use]
    pub fn from_awards(user_id: UserId, mut awards: Vec<ExperienceAward>) -> Self {
        awards.sort_by(|a, b| b.awarded_at.cmp(&a.awarded_at));
        let total = total_experience(&awards);
        Self {
            user_id,
            total,
            awards,
        }
    }
}
