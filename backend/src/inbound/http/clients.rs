//! Client and match ledger HTTP handlers.
//!
//! ```text
//! POST   /api/v1/clients
//! POST   /api/v1/clients/query
//! POST   /api/v1/clients/batch
//! POST   /api/v1/matches
//! DELETE /api/v1/clients/{id}
//! DELETE /api/v1/clients
//! ```

use actix_web::{delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateClientRequest, DeleteClientRequest, GetClientsRequest, QueryClientsRequest,
    RecordMatchRequest,
};
use crate::domain::{Client, ClientFilter, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_rfc3339_timestamp};

/// Request payload for creating a client.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequestBody {
    pub name: String,
    #[schema(format = "date-time")]
    pub birthday: Option<String>,
    /// Initial score; defaults to zero and must not be negative.
    pub score: Option<i64>,
}

/// Identifier assigned to a newly created client.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientResponseBody {
    pub id: String,
}

/// Sparse client filter. Absent fields do not constrain the query.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientFilterBody {
    pub id: Option<String>,
    /// SQL `LIKE` pattern matched against the client name.
    pub name: Option<String>,
    #[schema(format = "date-time")]
    pub birthday: Option<String>,
    pub score: Option<i64>,
    #[schema(format = "date-time")]
    pub created_at: Option<String>,
}

/// Client ids ordered by score, highest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryClientsResponseBody {
    pub ids: Vec<String>,
}

/// Request payload for a batch read.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetClientsRequestBody {
    pub ids: Vec<String>,
}

/// Client record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientBody {
    pub id: String,
    pub name: String,
    #[schema(format = "date-time")]
    pub birthday: Option<String>,
    pub score: i64,
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Clients in request order; unknown ids are omitted.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetClientsResponseBody {
    pub clients: Vec<ClientBody>,
}

/// Request payload for recording a match.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchRequestBody {
    pub client_id: String,
    /// Signed score delta added to the client's aggregate.
    pub score: i64,
}

/// Identifier assigned to the recorded match.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchResponseBody {
    pub id: i64,
}

/// Empty acknowledgement body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EmptyResponseBody {}

impl From<Client> for ClientBody {
    fn from(client: Client) -> Self {
        let Client {
            id,
            name,
            birthday,
            score,
            created_at,
        } = client;
        Self {
            id: id.into(),
            name: name.as_ref().to_owned(),
            birthday: birthday.map(|value| value.to_rfc3339()),
            score,
            created_at: created_at.to_rfc3339(),
        }
    }
}

fn parse_filter(body: ClientFilterBody) -> Result<ClientFilter, Error> {
    let ClientFilterBody {
        id,
        name,
        birthday,
        score,
        created_at,
    } = body;
    Ok(ClientFilter {
        id,
        name_pattern: name,
        birthday: parse_optional_rfc3339_timestamp(birthday, FieldName::new("birthday"))?,
        score,
        created_at: parse_optional_rfc3339_timestamp(created_at, FieldName::new("createdAt"))?,
    })
}

/// Create a client and return its generated id.
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = CreateClientRequestBody,
    responses(
        (status = 200, description = "Client created", body = CreateClientResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "createClient"
)]
#[post("/clients")]
pub async fn create_client(
    state: web::Data<HttpState>,
    payload: web::Json<CreateClientRequestBody>,
) -> ApiResult<web::Json<CreateClientResponseBody>> {
    let CreateClientRequestBody {
        name,
        birthday,
        score,
    } = payload.into_inner();
    let birthday = parse_optional_rfc3339_timestamp(birthday, FieldName::new("birthday"))?;

    let response = state
        .clients
        .create_client(CreateClientRequest {
            name,
            birthday,
            score,
        })
        .await?;

    Ok(web::Json(CreateClientResponseBody {
        id: response.id.into(),
    }))
}

/// Return the ids of clients matching every supplied filter field.
#[utoipa::path(
    post,
    path = "/api/v1/clients/query",
    request_body = ClientFilterBody,
    responses(
        (status = 200, description = "Matching client ids", body = QueryClientsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "queryClients"
)]
#[post("/clients/query")]
pub async fn query_clients(
    state: web::Data<HttpState>,
    payload: web::Json<ClientFilterBody>,
) -> ApiResult<web::Json<QueryClientsResponseBody>> {
    let filter = parse_filter(payload.into_inner())?;

    let response = state
        .clients_query
        .query_clients(QueryClientsRequest { filter })
        .await?;

    Ok(web::Json(QueryClientsResponseBody {
        ids: response.ids.into_iter().map(String::from).collect(),
    }))
}

/// Load full records for the given ids.
#[utoipa::path(
    post,
    path = "/api/v1/clients/batch",
    request_body = GetClientsRequestBody,
    responses(
        (status = 200, description = "Client records", body = GetClientsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClients"
)]
#[post("/clients/batch")]
pub async fn get_clients(
    state: web::Data<HttpState>,
    payload: web::Json<GetClientsRequestBody>,
) -> ApiResult<web::Json<GetClientsResponseBody>> {
    let response = state
        .clients_query
        .get_clients(GetClientsRequest {
            ids: payload.into_inner().ids,
        })
        .await?;

    Ok(web::Json(GetClientsResponseBody {
        clients: response.clients.into_iter().map(ClientBody::from).collect(),
    }))
}

/// Append a match to the ledger and apply its delta to the client score.
///
/// A `transaction_failed` response means the outcome is unknown; the match
/// may or may not have been recorded.
#[utoipa::path(
    post,
    path = "/api/v1/matches",
    request_body = RecordMatchRequestBody,
    responses(
        (status = 200, description = "Match recorded", body = RecordMatchResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema),
        (status = 500, description = "Store or transaction failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "recordMatch"
)]
#[post("/matches")]
pub async fn record_match(
    state: web::Data<HttpState>,
    payload: web::Json<RecordMatchRequestBody>,
) -> ApiResult<web::Json<RecordMatchResponseBody>> {
    let RecordMatchRequestBody { client_id, score } = payload.into_inner();

    let response = state
        .clients
        .record_match(RecordMatchRequest { client_id, score })
        .await?;

    Ok(web::Json(RecordMatchResponseBody {
        id: response.id.get(),
    }))
}

/// Delete one client and its matches. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "Client deleted", body = EmptyResponseBody),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "deleteClient"
)]
#[delete("/clients/{id}")]
pub async fn delete_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmptyResponseBody>> {
    state
        .clients
        .delete_client(DeleteClientRequest {
            id: path.into_inner(),
        })
        .await?;

    Ok(web::Json(EmptyResponseBody {}))
}

/// Delete every client and, through cascade, every match.
#[utoipa::path(
    delete,
    path = "/api/v1/clients",
    responses(
        (status = 200, description = "All clients deleted", body = EmptyResponseBody),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "deleteAllClients"
)]
#[delete("/clients")]
pub async fn delete_all_clients(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<EmptyResponseBody>> {
    state.clients.delete_all_clients().await?;

    Ok(web::Json(EmptyResponseBody {}))
}

#[cfg(test)]
#[path = "clients_tests.rs"]
mod tests;
