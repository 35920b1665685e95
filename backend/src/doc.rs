//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the client, match, sort and health endpoints
//! - **Schemas**: request and response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe errors without
//!   coupling domain types to utoipa
//!
//! The document is exported via `cargo run --bin openapi-dump` for external
//! tooling.

use crate::inbound::http::clients::{
    ClientBody, ClientFilterBody, CreateClientRequestBody, CreateClientResponseBody,
    EmptyResponseBody, GetClientsRequestBody, GetClientsResponseBody, QueryClientsResponseBody,
    RecordMatchRequestBody, RecordMatchResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::sort::{SortRequestBody, SortResponseBody};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clients backend API",
        description = "Client records, the match ledger and string sorting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::query_clients,
        crate::inbound::http::clients::get_clients,
        crate::inbound::http::clients::record_match,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::clients::delete_all_clients,
        crate::inbound::http::sort::sort,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ClientBody,
        ClientFilterBody,
        CreateClientRequestBody,
        CreateClientResponseBody,
        EmptyResponseBody,
        GetClientsRequestBody,
        GetClientsResponseBody,
        QueryClientsResponseBody,
        RecordMatchRequestBody,
        RecordMatchResponseBody,
        SortRequestBody,
        SortResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "clients", description = "Client records"),
        (name = "matches", description = "Match ledger"),
        (name = "sort", description = "String normalisation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
