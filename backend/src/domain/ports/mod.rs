//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod client_repository;
mod clients_command;
mod clients_query;
mod match_ledger;

#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientRepository, ClientRepositoryError, FixtureClientRepository};
#[cfg(test)]
pub use clients_command::MockClientsCommand;
pub use clients_command::{
    ClientsCommand, CreateClientRequest, CreateClientResponse, DeleteClientRequest,
    FixtureClientsCommand, RecordMatchRequest, RecordMatchResponse,
};
#[cfg(test)]
pub use clients_query::MockClientsQuery;
pub use clients_query::{
    ClientsQuery, FixtureClientsQuery, GetClientsRequest, GetClientsResponse, QueryClientsRequest,
    QueryClientsResponse,
};
#[cfg(test)]
pub use match_ledger::MockMatchLedger;
pub use match_ledger::{FixtureMatchLedger, MatchLedger, MatchLedgerError};
