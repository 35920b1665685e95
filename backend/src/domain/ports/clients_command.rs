//! Driving port for client and match mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ClientId, Error, MatchId};

/// Request to create a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientRequest {
    pub name: String,
    pub birthday: Option<DateTime<Utc>>,
    /// Starting score; `None` means 0.
    pub score: Option<i64>,
}

/// Response carrying the identifier assigned to a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientResponse {
    pub id: ClientId,
}

/// Request to record a match for a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMatchRequest {
    pub client_id: String,
    /// Score delta; negative and zero deltas are allowed.
    pub score: i64,
}

/// Response carrying the ledger identifier of the recorded match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMatchResponse {
    pub id: MatchId,
}

/// Request to delete a single client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClientRequest {
    pub id: String,
}

/// Domain use-case port for mutating clients and the match ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientsCommand: Send + Sync {
    /// Create a client with a freshly generated identifier.
    async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<CreateClientResponse, Error>;

    /// Record a match and adjust the client's aggregate score atomically.
    async fn record_match(&self, request: RecordMatchRequest) -> Result<RecordMatchResponse, Error>;

    /// Delete one client. Deleting an unknown id succeeds.
    async fn delete_client(&self, request: DeleteClientRequest) -> Result<(), Error>;

    /// Delete every client.
    async fn delete_all_clients(&self) -> Result<(), Error>;
}

/// Fixture command port used by handler tests that do not need a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientsCommand;

#[async_trait]
impl ClientsCommand for FixtureClientsCommand {
    async fn create_client(
        &self,
        _request: CreateClientRequest,
    ) -> Result<CreateClientResponse, Error> {
        const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

        let id = ClientId::new(FIXTURE_ID)
            .map_err(|err| Error::execution_failed(format!("invalid fixture client id: {err}")))?;
        Ok(CreateClientResponse { id })
    }

    async fn record_match(
        &self,
        _request: RecordMatchRequest,
    ) -> Result<RecordMatchResponse, Error> {
        Ok(RecordMatchResponse {
            id: MatchId::new(1),
        })
    }

    async fn delete_client(&self, _request: DeleteClientRequest) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_all_clients(&self) -> Result<(), Error> {
        Ok(())
    }
}
