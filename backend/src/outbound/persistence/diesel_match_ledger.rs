//! PostgreSQL-backed `MatchLedger` implementation using Diesel ORM.
//!
//! Each recorded match runs one transaction: append the ledger row, then
//! add the delta to the owning client's score. Any failure inside the
//! transaction rolls both writes back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{MatchLedger, MatchLedgerError};
use crate::domain::{ClientId, MatchId};

use super::diesel_helpers::{StoreFailure, classify_diesel_error, map_ledger_pool_error};
use super::models::NewMatchRow;
use super::pool::DbPool;
use super::schema::client_matches;

const APPLY_DELTA_SQL: &str = "UPDATE clients SET score = COALESCE(score, 0) + $1 WHERE id = $2";

/// Why a ledger transaction did not commit.
#[derive(Debug)]
enum LedgerFailure {
    /// The score update touched no client row.
    UnknownClient,
    /// A statement inside the transaction failed.
    Statement(DieselError),
    /// Begin, commit or rollback failed.
    Transaction(DieselError),
}

impl From<DieselError> for LedgerFailure {
    fn from(error: DieselError) -> Self {
        Self::Transaction(error)
    }
}

fn map_ledger_failure(failure: LedgerFailure, client_id: &ClientId) -> MatchLedgerError {
    match failure {
        LedgerFailure::UnknownClient => MatchLedgerError::unknown_client(client_id.as_ref()),
        LedgerFailure::Statement(error) => {
            match classify_diesel_error(&error, "match ledger statement") {
                StoreFailure::ForeignKey(_) => MatchLedgerError::unknown_client(client_id.as_ref()),
                StoreFailure::Connection(message) => MatchLedgerError::connection(message),
                StoreFailure::QueryBuild(message) | StoreFailure::Execution(message) => {
                    MatchLedgerError::statement(message)
                }
            }
        }
        LedgerFailure::Transaction(error) => {
            let message = match classify_diesel_error(&error, "match ledger transaction") {
                StoreFailure::Connection(message)
                | StoreFailure::QueryBuild(message)
                | StoreFailure::ForeignKey(message)
                | StoreFailure::Execution(message) => message,
            };
            warn!(%client_id, %message, "match ledger transaction failed; outcome unknown");
            MatchLedgerError::transaction(message)
        }
    }
}

/// Diesel-backed implementation of the match ledger port.
#[derive(Clone)]
pub struct DieselMatchLedger {
    pool: DbPool,
}

impl DieselMatchLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchLedger for DieselMatchLedger {
    async fn record_match(
        &self,
        client_id: &ClientId,
        delta: i64,
    ) -> Result<MatchId, MatchLedgerError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_ledger_pool_error)?;
        let owner = client_id.as_ref();

        let match_id = conn
            .transaction(|conn| {
                async move {
                    let match_id = diesel::insert_into(client_matches::table)
                        .values(NewMatchRow {
                            client_id: owner,
                            score: delta,
                        })
                        .returning(client_matches::id)
                        .get_result::<i64>(conn)
                        .await
                        .map_err(LedgerFailure::Statement)?;

                    let updated = sql_query(APPLY_DELTA_SQL)
                        .bind::<BigInt, _>(delta)
                        .bind::<Text, _>(owner)
                        .execute(conn)
                        .await
                        .map_err(LedgerFailure::Statement)?;

                    if updated == 0 {
                        return Err(LedgerFailure::UnknownClient);
                    }
                    Ok(match_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(|failure: LedgerFailure| map_ledger_failure(failure, client_id))?;

        debug!(%client_id, match_id, delta, "match ledger transaction committed");
        Ok(MatchId::new(match_id))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    use super::*;

    fn client_id() -> ClientId {
        ClientId::new("c-42").expect("valid id")
    }

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn untouched_score_row_reports_unknown_client() {
        let err = map_ledger_failure(LedgerFailure::UnknownClient, &client_id());

        assert_eq!(err, MatchLedgerError::unknown_client("c-42"));
    }

    #[rstest]
    fn foreign_key_violation_reports_unknown_client() {
        let failure = LedgerFailure::Statement(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert violates foreign key constraint",
        ));

        let err = map_ledger_failure(failure, &client_id());

        assert_eq!(err, MatchLedgerError::unknown_client("c-42"));
    }

    #[rstest]
    #[case(DatabaseErrorKind::SerializationFailure, "could not serialize access")]
    #[case(DatabaseErrorKind::CheckViolation, "check constraint failed")]
    fn statement_failures_are_reported_as_statement_errors(
        #[case] kind: DatabaseErrorKind,
        #[case] message: &str,
    ) {
        let failure = LedgerFailure::Statement(database_error(kind, message));

        let err = map_ledger_failure(failure, &client_id());

        assert_eq!(err, MatchLedgerError::statement(message));
    }

    #[rstest]
    fn lost_connection_during_statement_is_a_connection_error() {
        let failure = LedgerFailure::Statement(database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection",
        ));

        let err = map_ledger_failure(failure, &client_id());

        assert!(matches!(err, MatchLedgerError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::RollbackTransaction)]
    #[case(database_error(DatabaseErrorKind::UnableToSendCommand, "commit failed"))]
    fn begin_commit_and_rollback_failures_are_transaction_errors(#[case] error: DieselError) {
        let err = map_ledger_failure(LedgerFailure::from(error), &client_id());

        assert!(matches!(err, MatchLedgerError::Transaction { .. }));
    }
}
