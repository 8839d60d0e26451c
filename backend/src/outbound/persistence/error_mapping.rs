//! Shared mapping from pool and Diesel failures to port error constructors.
//!
//! Driver messages are logged at debug level and replaced by short generic
//! text, so SQL fragments and constraint names never reach a response body.

use tracing::{debug, warn};

use super::pool::PoolError;

/// Map a pool failure through a repository's connection constructor.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    warn!(%message, "connection checkout failed");
    connection("database unavailable".to_owned())
}

/// Map a Diesel failure through a repository's query/connection constructors.
pub(super) fn map_diesel_error<E>(
    error: diesel::result::Error,
    operation: &'static str,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserPersistenceError;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("timed out waiting"))]
    #[case(PoolError::build("bad url"))]
    fn pool_failures_become_connection_errors(#[case] error: PoolError) {
        let mapped = map_pool_error(error, UserPersistenceError::connection);
        assert_eq!(mapped, UserPersistenceError::connection("database unavailable"));
    }

    #[rstest]
    fn pool_failures_drop_the_driver_text() {
        let error = PoolError::checkout(
            "password authentication failed for user \"tripsync\" at db.internal:5432",
        );
        let mapped = map_pool_error(error, UserPersistenceError::connection);
        assert!(!mapped.to_string().contains("db.internal"));
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        let mapped = map_diesel_error(
            diesel::result::Error::NotFound,
            "load",
            UserPersistenceError::query,
            UserPersistenceError::connection,
        );
        assert_eq!(mapped, UserPersistenceError::query("record not found"));
    }

    #[rstest]
    fn builder_failures_are_generic_query_errors() {
        let mapped = map_diesel_error(
            diesel::result::Error::QueryBuilderError("bad column".into()),
            "load",
            UserPersistenceError::query,
            UserPersistenceError::connection,
        );
        assert_eq!(mapped, UserPersistenceError::query("database error"));
    }
}
