//! Request validation helpers shared by the HTTP handlers.
//!
//! Field failures become `invalid_request` errors whose details name the
//! field and a stable reason code, for example
//! `{"field": "title", "code": "empty_field"}`.

use serde_json::json;

use crate::domain::{Error, FieldValidationError, QuestionStatus};

impl From<FieldValidationError> for Error {
    fn from(err: FieldValidationError) -> Self {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

/// Parse an optional `status` query value.
pub(crate) fn parse_status(raw: Option<&str>) -> Result<Option<QuestionStatus>, Error> {
    raw.map(|value| {
        value.parse().map_err(|_| {
            Error::invalid_request(format!("unknown question status: {value}")).with_details(
                json!({ "field": "status", "value": value, "code": "invalid_status" }),
            )
        })
    })
    .transpose()
}

/// Treat blank query values as absent.
pub(crate) fn non_blank(raw: Option<String>) -> Option<String> {
    raw.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}
