//! Clients backend library: domain model, HTTP adapter and PostgreSQL
//! persistence for client records and the match ledger.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
