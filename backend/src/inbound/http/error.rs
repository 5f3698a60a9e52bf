//! HTTP adapter mapping for domain errors.
//!
//! The domain [`Error`] stays transport-agnostic; this module gives it an
//! actix [`ResponseError`] implementation so handlers can return it with `?`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal errors keep only their trace id; the message and details stay
/// in the logs.
pub(crate) fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), trace_id = ?self.trace_id(), message = self.message(), "request failed");
        } else {
            debug!(code = ?self.code(), reason = ?self.reason(), "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
