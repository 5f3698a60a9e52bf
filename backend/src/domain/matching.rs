//! Matching board: recruiting posts and the reviews left on them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{Category, Content, PostId, ReviewId, Title, UserId};

/// Recruitment state of a matching post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchingPostStatus {
    /// Still looking for participants.
    #[default]
    Recruiting,
    /// Recruitment has finished.
    RecruitmentCompleted,
}

impl MatchingPostStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::RecruitmentCompleted => "recruitment_completed",
        }
    }
}

impl fmt::Display for MatchingPostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or requested post status is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown matching post status: {0}")]
pub struct UnknownPostStatus(pub String);

impl FromStr for MatchingPostStatus {
    type Err = UnknownPostStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recruiting" => Ok(Self::Recruiting),
            "recruitment_completed" => Ok(Self::RecruitmentCompleted),
            _ => Err(UnknownPostStatus(s.to_owned())),
        }
    }
}

/// A recruiting post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPost {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Poster.
    pub author_id: UserId,
    /// Board category.
    pub category: Category,
    /// Recruitment state.
    pub status: MatchingPostStatus,
    /// Headline.
    pub title: Title,
    /// Body.
    pub content: Content,
    /// Times the post detail was viewed.
    pub view_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Post fields handed to storage on creation. New posts start recruiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatchingPost {
    /// Poster.
    pub author_id: UserId,
    /// Board category.
    pub category: Category,
    /// Headline.
    pub title: Title,
    /// Body.
    pub content: Content,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Editable post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingPostEdit {
    /// New category.
    pub category: Category,
    /// New recruitment state.
    pub status: MatchingPostStatus,
    /// New headline.
    pub title: Title,
    /// New body.
    pub content: Content,
}

/// A review left on a matching post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPostReview {
    /// Store-assigned identifier.
    pub id: ReviewId,
    /// Reviewed post.
    pub post_id: PostId,
    /// Reviewer.
    pub author_id: UserId,
    /// Body.
    pub content: Content,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Review fields handed to storage on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Reviewed post.
    pub post_id: PostId,
    /// Reviewer.
    pub author_id: UserId,
    /// Body.
    pub content: Content,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MatchingPostStatus::Recruiting)]
    #[case(MatchingPostStatus::RecruitmentCompleted)]
    fn storage_names_parse_back(#[case] status: MatchingPostStatus) {
        assert_eq!(status.as_str().parse::<MatchingPostStatus>(), Ok(status));
    }

    #[rstest]
    fn api_uses_screaming_case() {
        let value =
            serde_json::to_value(MatchingPostStatus::RecruitmentCompleted).expect("serialise");
        assert_eq!(value, serde_json::json!("RECRUITMENT_COMPLETED"));
    }

    #[rstest]
    fn posts_start_recruiting() {
        assert_eq!(MatchingPostStatus::default(), MatchingPostStatus::Recruiting);
    }
}
