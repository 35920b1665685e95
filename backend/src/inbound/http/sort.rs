//! Sort endpoint exposing the result normaliser.
//!
//! ```text
//! POST /api/v1/sort
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::normalize::sort_items;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;

/// Request payload for sorting strings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortRequestBody {
    pub items: Vec<String>,
    #[serde(default)]
    pub remove_duplicates: bool,
}

/// Sorted strings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortResponseBody {
    pub items: Vec<String>,
}

/// Sort strings by byte order, optionally dropping duplicates.
#[utoipa::path(
    post,
    path = "/api/v1/sort",
    request_body = SortRequestBody,
    responses(
        (status = 200, description = "Sorted items", body = SortResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["sort"],
    operation_id = "sortItems"
)]
#[post("/sort")]
pub async fn sort(payload: web::Json<SortRequestBody>) -> ApiResult<web::Json<SortResponseBody>> {
    let SortRequestBody {
        items,
        remove_duplicates,
    } = payload.into_inner();

    Ok(web::Json(SortResponseBody {
        items: sort_items(items, remove_duplicates),
    }))
}
