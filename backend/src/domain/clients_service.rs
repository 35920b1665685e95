//! Client domain services.
//!
//! These services implement the client driving ports. They validate input,
//! bound every store call by the request deadline, and translate port errors
//! into the domain error taxonomy without changing their kind.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ClientRepository, ClientRepositoryError, ClientsCommand, ClientsQuery, CreateClientRequest,
    CreateClientResponse, DeleteClientRequest, GetClientsRequest, GetClientsResponse, MatchLedger,
    MatchLedgerError, QueryClientsRequest, QueryClientsResponse, RecordMatchRequest,
    RecordMatchResponse,
};
use crate::domain::{
    ClientId, ClientIdGenerator, ClientName, ClientValidationError, Error, NewClient,
    UuidClientIdGenerator,
};

/// Deadline applied to each store call unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

fn map_repository_error(error: ClientRepositoryError) -> Error {
    match error {
        ClientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("client repository unavailable: {message}"))
        }
        ClientRepositoryError::QueryBuild { message } => {
            Error::query_build_failed(format!("client query could not be built: {message}"))
        }
        ClientRepositoryError::Query { message } => {
            Error::execution_failed(format!("client repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: MatchLedgerError) -> Error {
    match error {
        MatchLedgerError::Connection { message } => {
            Error::service_unavailable(format!("match ledger unavailable: {message}"))
        }
        MatchLedgerError::UnknownClient { client_id } => {
            Error::not_found(format!("client {client_id} does not exist"))
                .with_details(json!({ "field": "clientId", "value": client_id }))
        }
        MatchLedgerError::Statement { message } => {
            Error::execution_failed(format!("match was not recorded: {message}"))
        }
        MatchLedgerError::Transaction { message } => Error::transaction_failed(format!(
            "match outcome unknown, do not assume it was recorded: {message}"
        )),
    }
}

fn invalid_field(field: &str, error: &ClientValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Run a repository call under the request deadline.
async fn repository_call<T>(
    timeout: Duration,
    operation: &str,
    call: impl Future<Output = Result<T, ClientRepositoryError>>,
) -> Result<T, Error> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(map_repository_error),
        Err(_) => Err(Error::execution_failed(format!(
            "{operation} exceeded the {}ms deadline",
            timeout.as_millis()
        ))),
    }
}

/// Client service implementing the command driving port.
#[derive(Clone)]
pub struct ClientsCommandService<R, L, G = UuidClientIdGenerator> {
    client_repo: Arc<R>,
    match_ledger: Arc<L>,
    id_generator: Arc<G>,
    request_timeout: Duration,
}

impl<R, L> ClientsCommandService<R, L, UuidClientIdGenerator> {
    /// Create a command service that assigns random UUID identifiers.
    pub fn new(client_repo: Arc<R>, match_ledger: Arc<L>) -> Self {
        Self::with_id_generator(client_repo, match_ledger, Arc::new(UuidClientIdGenerator))
    }
}

impl<R, L, G> ClientsCommandService<R, L, G> {
    /// Create a command service with an explicit identifier source.
    pub fn with_id_generator(client_repo: Arc<R>, match_ledger: Arc<L>, id_generator: Arc<G>) -> Self {
        Self {
            client_repo,
            match_ledger,
            id_generator,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-call store deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

#[async_trait]
impl<R, L, G> ClientsCommand for ClientsCommandService<R, L, G>
where
    R: ClientRepository,
    L: MatchLedger,
    G: ClientIdGenerator,
{
    async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<CreateClientResponse, Error> {
        let name = ClientName::new(request.name).map_err(|err| invalid_field("name", &err))?;
        let id = self.id_generator.next_id();
        let client = NewClient::new(id, name, request.birthday, request.score.unwrap_or(0))
            .map_err(|err| invalid_field("score", &err))?;

        repository_call(
            self.request_timeout,
            "client insert",
            self.client_repo.insert(&client),
        )
        .await?;

        info!(client_id = %client.id(), score = client.score(), "client created");
        Ok(CreateClientResponse {
            id: client.id().clone(),
        })
    }

    async fn record_match(&self, request: RecordMatchRequest) -> Result<RecordMatchResponse, Error> {
        let client_id =
            ClientId::new(request.client_id).map_err(|err| invalid_field("clientId", &err))?;

        let outcome = tokio::time::timeout(
            self.request_timeout,
            self.match_ledger.record_match(&client_id, request.score),
        )
        .await
        .map_err(|_| {
            Error::transaction_failed(format!(
                "match for client {client_id} exceeded the {}ms deadline; outcome unknown",
                self.request_timeout.as_millis()
            ))
        })?;
        let match_id = outcome.map_err(map_ledger_error)?;

        info!(%client_id, %match_id, delta = request.score, "match recorded");
        Ok(RecordMatchResponse { id: match_id })
    }

    async fn delete_client(&self, request: DeleteClientRequest) -> Result<(), Error> {
        let id = ClientId::new(request.id).map_err(|err| invalid_field("id", &err))?;

        let removed =
            repository_call(self.request_timeout, "client delete", self.client_repo.delete(&id))
                .await?;

        debug!(client_id = %id, removed, "client delete finished");
        Ok(())
    }

    async fn delete_all_clients(&self) -> Result<(), Error> {
        let removed = repository_call(
            self.request_timeout,
            "client bulk delete",
            self.client_repo.delete_all(),
        )
        .await?;

        info!(removed, "all clients deleted");
        Ok(())
    }
}

/// Client service implementing the query driving port.
#[derive(Clone)]
pub struct ClientsQueryService<R> {
    client_repo: Arc<R>,
    request_timeout: Duration,
}

impl<R> ClientsQueryService<R> {
    /// Create a new query service with the client repository.
    pub fn new(client_repo: Arc<R>) -> Self {
        Self {
            client_repo,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-call store deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

#[async_trait]
impl<R> ClientsQuery for ClientsQueryService<R>
where
    R: ClientRepository,
{
    async fn query_clients(
        &self,
        request: QueryClientsRequest,
    ) -> Result<QueryClientsResponse, Error> {
        let ids = repository_call(
            self.request_timeout,
            "client query",
            self.client_repo.query_ids(&request.filter),
        )
        .await?;

        debug!(
            predicates = request.filter.predicate_count(),
            matches = ids.len(),
            "client query finished"
        );
        Ok(QueryClientsResponse { ids })
    }

    async fn get_clients(&self, request: GetClientsRequest) -> Result<GetClientsResponse, Error> {
        let ids = request
            .ids
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                ClientId::new(raw).map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "ids", "index": index }))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Ok(GetClientsResponse {
                clients: Vec::new(),
            });
        }

        let clients = repository_call(
            self.request_timeout,
            "client batch read",
            self.client_repo.find_by_ids(&ids),
        )
        .await?;

        Ok(GetClientsResponse { clients })
    }
}

#[cfg(test)]
#[path = "clients_service_tests.rs"]
mod tests;
