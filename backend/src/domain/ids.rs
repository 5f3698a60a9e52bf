//! Store-assigned identifiers.
//!
//! Entities reference each other through these newtypes rather than holding
//! object graphs, so a question never owns its author and an answer only knows
//! its question's id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of a board question.
    QuestionId
);
define_id!(
    /// Identifier of an answer to a question.
    AnswerId
);
define_id!(
    /// Identifier of a matching board post.
    PostId
);
define_id!(
    /// Identifier of a review left on a matching post.
    ReviewId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_bare_numbers() {
        let value = serde_json::to_value(QuestionId::new(42)).expect("serialise id");
        assert_eq!(value, serde_json::json!(42));
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case("-3", Some(-3))]
    #[case("seven", None)]
    fn ids_parse_from_path_segments(#[case] raw: &str, #[case] expected: Option<i64>) {
        let parsed = raw.parse::<AnswerId>().ok().map(AnswerId::get);
        assert_eq!(parsed, expected);
    }
}
