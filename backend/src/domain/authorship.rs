//! Ownership guard shared by every author-only mutation.

use super::{Error, UserId};

/// Reason code attached when the caller is not the resource author.
pub const MISMATCH_AUTHOR: &str = "mismatch_author";

/// Fail with `forbidden` (`mismatch_author`) unless `caller` wrote the
/// resource. Call before any write.
///
/// # Examples
/// ```
/// use titto_backend::domain::{ensure_author, ErrorCode, UserId};
///
/// assert!(ensure_author(UserId::new(1), UserId::new(1), "answer").is_ok());
/// let err = ensure_author(UserId::new(1), UserId::new(2), "answer").unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// ```
pub fn ensure_author(author_id: UserId, caller_id: UserId, resource: &str) -> Result<(), Error> {
    if author_id == caller_id {
        Ok(())
    } else {
        Err(Error::forbidden(format!("only the author may modify this {resource}"))
            .with_reason(MISMATCH_AUTHOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn mismatch_carries_reason_code() {
        let err = ensure_author(UserId::new(7), UserId::new(8), "question")
            .expect_err("different users");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.reason(), Some(MISMATCH_AUTHOR));
        assert!(err.message().contains("question"));
    }
}
