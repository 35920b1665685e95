//! Domain primitives, ports and services.
//!
//! Purpose: define the client and match-ledger types shared by the inbound
//! and persistence layers, the ports those layers implement, and the
//! services that drive them. Types here know nothing about HTTP or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure kind.
//! - Client, NewClient, ClientId, ClientName, ClientFilter, MatchId: client
//!   records, identifiers and the sparse read filter.
//! - ClientIdGenerator, UuidClientIdGenerator: identifier assignment.
//! - ClientsCommandService, ClientsQueryService: driving port
//!   implementations.

pub mod client;
pub mod clients_service;
pub mod error;
pub mod identifier;
pub mod normalize;
pub mod ports;

pub use self::client::{
    Client, ClientFilter, ClientId, ClientName, ClientValidationError, MatchId, NewClient,
};
pub use self::clients_service::{
    ClientsCommandService, ClientsQueryService, DEFAULT_REQUEST_TIMEOUT,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
#[cfg(test)]
pub use self::identifier::MockClientIdGenerator;
pub use self::identifier::{ClientIdGenerator, UuidClientIdGenerator};
