//! Registered community members and their reputation counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Department, Email, Nickname, PersonName, StudentNo, UserId};

/// Profile data supplied at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Unique e-mail address.
    pub email: Email,
    /// Legal name.
    pub name: PersonName,
    /// Public nickname.
    pub nickname: Nickname,
    /// University student number.
    pub student_no: StudentNo,
    /// Home department.
    pub department: Department,
}

/// A registered user.
///
/// `answer_count`, `accept_count` and `experience` only change through the
/// answer workflow. `experience` is the materialised fold of the user's
/// award history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique e-mail address.
    pub email: Email,
    /// Legal name.
    pub name: PersonName,
    /// Public nickname.
    pub nickname: Nickname,
    /// University student number.
    pub student_no: StudentNo,
    /// Home department.
    pub department: Department,
    /// Answers currently authored by the user.
    pub answer_count: u32,
    /// Answers of the user that were accepted.
    pub accept_count: u32,
    /// Total experience points received.
    pub experience: u64,
    /// Signup timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with zeroed counters.
    #[must_use]
    pub fn register(id: UserId, profile: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser {
            email,
            name,
            nickname,
            student_no,
            department,
        } = profile;
        Self {
            id,
            email,
            name,
            nickname,
            student_no,
            department,
            answer_count: 0,
            accept_count: 0,
            experience: 0,
            created_at,
        }
    }
}
