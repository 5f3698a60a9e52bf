//! Validated free-text fields shared by the boards and accounts.
//!
//! Every field trims surrounding whitespace, rejects blank input, and caps
//! its length in characters. Adapters surface [`FieldValidationError`] as an
//! `invalid_request` error whose details name the offending field.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation failures raised by text field constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValidationError {
    /// The field was empty once trimmed.
    #[error("{field} must not be empty")]
    Empty {
        /// Field name in request payloads.
        field: &'static str,
    },
    /// The field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name in request payloads.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
    },
    /// The field does not have the expected shape.
    #[error("{field} is malformed")]
    Malformed {
        /// Field name in request payloads.
        field: &'static str,
    },
}

impl FieldValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Malformed { field } => {
                field
            }
        }
    }

    /// Stable reason code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty_field",
            Self::TooLong { .. } => "field_too_long",
            Self::Malformed { .. } => "malformed_field",
        }
    }
}

fn validate(
    raw: String,
    field: &'static str,
    max: usize,
) -> Result<String, FieldValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(FieldValidationError::TooLong { field, max });
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

macro_rules! define_text_field {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(try_from = "String", into = "String")]
        #[schema(value_type = String)]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            /// Validate and construct the field from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, FieldValidationError> {
                validate(value.into(), $field, Self::MAX_LEN).map(Self)
            }

            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_text_field!(
    /// Headline of a question or matching post.
    Title, "title", 200
);
define_text_field!(
    /// Body text of questions, answers, posts, and reviews.
    Content, "content", 10_000
);
define_text_field!(
    /// University department a user or question belongs to.
    Department, "department", 100
);
define_text_field!(
    /// Matching board category.
    Category, "category", 50
);
define_text_field!(
    /// Legal name of a user.
    PersonName, "name", 50
);
define_text_field!(
    /// Public nickname shown on the boards.
    Nickname, "nickname", 30
);
define_text_field!(
    /// University student number.
    StudentNo, "studentNo", 20
);

/// Account e-mail address, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "student@titto.ac.kr")]
pub struct Email(String);

impl Email {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 254;

    /// Validate and normalise an e-mail address to lower case.
    ///
    /// # Examples
    /// ```
    /// use titto_backend::domain::Email;
    ///
    /// let email = Email::new(" Student@Titto.ac.kr ").expect("valid e-mail");
    /// assert_eq!(email.as_str(), "student@titto.ac.kr");
    /// assert!(Email::new("no-at-sign").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, FieldValidationError> {
        let normalised = validate(value.into(), "email", Self::MAX_LEN)?.to_lowercase();
        match normalised.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalised))
            }
            _ => Err(FieldValidationError::Malformed { field: "email" }),
        }
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "title")]
    #[case("   ", "title")]
    fn blank_titles_are_rejected(#[case] raw: &str, #[case] field: &str) {
        let err = Title::new(raw).expect_err("blank title");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "empty_field");
    }

    #[rstest]
    fn surrounding_whitespace_is_trimmed() {
        let title = Title::new("  How do I register?  ").expect("valid title");
        assert_eq!(title.as_str(), "How do I register?");
    }

    #[rstest]
    fn length_is_counted_in_characters() {
        let exact = "가".repeat(Nickname::MAX_LEN);
        assert!(Nickname::new(exact.clone()).is_ok());

        let err = Nickname::new(format!("{exact}가")).expect_err("too long");
        assert_eq!(
            err,
            FieldValidationError::TooLong {
                field: "nickname",
                max: Nickname::MAX_LEN
            }
        );
    }

    #[rstest]
    #[case("a@b")]
    #[case("Student@Titto.AC.KR")]
    fn emails_are_accepted_and_lowercased(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid e-mail");
        assert_eq!(email.as_str(), raw.to_lowercase());
    }

    #[rstest]
    #[case("@titto.ac.kr")]
    #[case("student@")]
    #[case("student")]
    fn malformed_emails_are_rejected(#[case] raw: &str) {
        let err = Email::new(raw).expect_err("malformed e-mail");
        assert_eq!(err.code(), "malformed_field");
    }

    #[rstest]
    fn deserialisation_validates() {
        let result: Result<Content, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
