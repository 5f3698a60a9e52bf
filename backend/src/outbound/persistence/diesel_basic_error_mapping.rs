//! Shared Diesel error mapping for the community repositories.
//!
//! Each repository error enum exposes `connection` and `query` constructors;
//! these helpers classify pool and Diesel failures into one or the other.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a repository connection error.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map a Diesel failure onto repository connection or query errors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database transaction state lost"),
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            query("concurrent update conflict")
        }
        _ => query("database error"),
    }
}

/// Whether the error is a unique violation on the named constraint.
pub fn is_unique_violation(error: &DieselError, constraint: &str) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}

#[cfg(test)]
mod tests {
    //! Classification coverage for the shared mappers.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |message| Mapped::Query(message.to_owned()),
            |message| Mapped::Connection(message.to_owned()),
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            Mapped::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn broken_transaction_is_a_connection_error() {
        assert!(matches!(
            map(DieselError::BrokenTransactionManager),
            Mapped::Connection(_)
        ));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);

        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DieselError::NotFound, "users_email_key"));
    }
}
