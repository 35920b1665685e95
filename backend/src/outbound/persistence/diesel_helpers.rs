//! Shared error mapping for the Diesel client adapters.
//!
//! Store failures are sorted into connection, query-build and execution
//! failures here so every adapter reports them the same way.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::{ClientRepositoryError, MatchLedgerError};

use super::pool::PoolError;

/// Failure categories shared by the client repository and match ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection was lost or never established.
    Connection(String),
    /// Diesel could not build the statement.
    QueryBuild(String),
    /// A foreign key constraint rejected the write.
    ForeignKey(String),
    /// Any other statement failure.
    Execution(String),
}

/// Log a Diesel failure and classify it.
pub(crate) fn classify_diesel_error(error: &DieselError, operation: &str) -> StoreFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::QueryBuilderError(err) => StoreFailure::QueryBuild(err.to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            if info
                .constraint_name()
                .is_some_and(|name| !name.contains("client_id"))
            {
                warn!(
                    constraint_name = ?info.constraint_name(),
                    "unrecognised foreign key violation"
                );
            }
            StoreFailure::ForeignKey(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => StoreFailure::Execution(info.message().to_owned()),
        DieselError::NotFound => StoreFailure::Execution("record not found".to_owned()),
        _ => StoreFailure::Execution("database error".to_owned()),
    }
}

/// Map pool errors to client repository errors.
pub(crate) fn map_pool_error(error: PoolError) -> ClientRepositoryError {
    ClientRepositoryError::connection(error.into_message())
}

/// Map Diesel errors to client repository errors.
pub(crate) fn map_diesel_error(error: &DieselError, operation: &str) -> ClientRepositoryError {
    match classify_diesel_error(error, operation) {
        StoreFailure::Connection(message) => ClientRepositoryError::connection(message),
        StoreFailure::QueryBuild(message) => ClientRepositoryError::query_build(message),
        StoreFailure::ForeignKey(message) | StoreFailure::Execution(message) => {
            ClientRepositoryError::query(message)
        }
    }
}

/// Map pool errors to match ledger errors.
pub(crate) fn map_ledger_pool_error(error: PoolError) -> MatchLedgerError {
    MatchLedgerError::connection(error.into_message())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(err, ClientRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn ledger_pool_errors_map_to_connection_failures() {
        let err = map_ledger_pool_error(PoolError::build("bad url"));

        assert_eq!(err, MatchLedgerError::connection("bad url"));
    }

    #[rstest]
    fn query_builder_errors_map_to_query_build() {
        let diesel_err = DieselError::QueryBuilderError("empty filter".into());

        let err = map_diesel_error(&diesel_err, "client query");

        assert_eq!(err, ClientRepositoryError::query_build("empty filter"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn other_errors_map_to_query(#[case] diesel_err: DieselError, #[case] message: &str) {
        let err = map_diesel_error(&diesel_err, "client query");

        assert_eq!(err, ClientRepositoryError::query(message));
    }
}
