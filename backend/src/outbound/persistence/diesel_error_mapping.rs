//! Shared mapping from pool and Diesel failures to port error constructors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the port's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(error = %error, "database pool failure");
    connection(error.message().to_owned())
}

/// Map a Diesel failure through the port's query or connection constructor.
///
/// The raw Diesel detail is logged at `debug`; callers only see a short
/// category message.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced user does not exist")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error(
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
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_owned()),
        );
        assert_eq!(
            map(error),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    fn foreign_key_violation_names_the_user() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("fk".to_owned()),
        );
        assert_eq!(
            map(error),
            Mapped::Query("referenced user does not exist".to_owned())
        );
    }

    #[rstest]
    fn pool_errors_use_connection_constructor() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }
}
