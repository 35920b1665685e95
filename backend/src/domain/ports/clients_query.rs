//! Driving port for client reads.

use async_trait::async_trait;

use crate::domain::{Client, ClientFilter, ClientId, Error};

/// Request to list client ids matching a sparse filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClientsRequest {
    pub filter: ClientFilter,
}

/// Matching ids, highest score first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryClientsResponse {
    pub ids: Vec<ClientId>,
}

/// Request to load clients by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetClientsRequest {
    pub ids: Vec<String>,
}

/// Loaded clients in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetClientsResponse {
    pub clients: Vec<Client>,
}

/// Domain use-case port for reading clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientsQuery: Send + Sync {
    /// List ids of clients matching the filter, ordered by score descending.
    async fn query_clients(
        &self,
        request: QueryClientsRequest,
    ) -> Result<QueryClientsResponse, Error>;

    /// Load full client records for the requested ids.
    async fn get_clients(&self, request: GetClientsRequest) -> Result<GetClientsResponse, Error>;
}

/// Fixture query port returning empty results.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientsQuery;

#[async_trait]
impl ClientsQuery for FixtureClientsQuery {
    async fn query_clients(
        &self,
        _request: QueryClientsRequest,
    ) -> Result<QueryClientsResponse, Error> {
        Ok(QueryClientsResponse { ids: Vec::new() })
    }

    async fn get_clients(&self, _request: GetClientsRequest) -> Result<GetClientsResponse, Error> {
        Ok(GetClientsResponse {
            clients: Vec::new(),
        })
    }
}
