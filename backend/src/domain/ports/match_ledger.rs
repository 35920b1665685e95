//! Port for appending to the match ledger.
//!
//! Recording a match is the one multi-statement write in the service: the
//! ledger row and the client's aggregate score change together or not at all.

use async_trait::async_trait;

use crate::domain::{ClientId, MatchId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by match ledger adapters.
    pub enum MatchLedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } =>
            "match ledger connection failed: {message}",
        /// The referenced client does not exist; nothing was written.
        UnknownClient { client_id: String } =>
            "client {client_id} does not exist",
        /// A statement inside the transaction failed; the transaction was
        /// rolled back.
        Statement { message: String } =>
            "match ledger statement failed: {message}",
        /// Begin, commit or rollback failed. Whether the match was recorded
        /// is unknown.
        Transaction { message: String } =>
            "match ledger transaction failed: {message}",
    }
}

/// Port for recording matches against a client's aggregate score.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchLedger: Send + Sync {
    /// Append a match with `delta` for `client_id` and add `delta` to the
    /// client's score in the same transaction.
    async fn record_match(
        &self,
        client_id: &ClientId,
        delta: i64,
    ) -> Result<MatchId, MatchLedgerError>;
}

/// Fixture implementation handing out sequential ids without persistence.
#[derive(Debug, Default)]
pub struct FixtureMatchLedger {
    next_id: std::sync::atomic::AtomicI64,
}

#[async_trait]
impl MatchLedger for FixtureMatchLedger {
    async fn record_match(
        &self,
        _client_id: &ClientId,
        _delta: i64,
    ) -> Result<MatchId, MatchLedgerError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            .saturating_add(1);
        Ok(MatchId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_assigns_increasing_ids() {
        let ledger = FixtureMatchLedger::default();
        let client = ClientId::new("c-1").expect("valid id");

        let first = ledger.record_match(&client, 5).await.expect("first match");
        let second = ledger.record_match(&client, -2).await.expect("second match");

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[rstest]
    fn unknown_client_names_the_client() {
        let err = MatchLedgerError::unknown_client("c-404");
        assert_eq!(err.to_string(), "client c-404 does not exist");
    }
}
