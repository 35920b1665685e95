//! PostgreSQL-backed `ClientRepository` implementation using Diesel ORM.
//!
//! Batch reads are split into statements of at most
//! [`MAX_IDS_PER_STATEMENT`] ids and reassembled in request order.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::debug_query;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::normalize::dedup_preserving_order;
use crate::domain::ports::{ClientRepository, ClientRepositoryError};
use crate::domain::{Client, ClientFilter, ClientId, NewClient};

use super::client_query_builder::build_client_id_query;
use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{ClientRow, NewClientRow};
use super::pool::DbPool;
use super::schema::clients;

/// Largest number of ids bound into a single batch read.
pub const MAX_IDS_PER_STATEMENT: usize = 1000;

/// Diesel-backed implementation of the client repository port.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn decode_row(row: ClientRow) -> Result<Client, ClientRepositoryError> {
    Client::try_from(row).map_err(|err| ClientRepositoryError::query(err.to_string()))
}

/// Arrange `rows` in the order of `requested`, dropping ids that matched
/// nothing.
fn order_by_request(requested: &[ClientId], rows: Vec<Client>) -> Vec<Client> {
    let mut by_id: HashMap<ClientId, Client> = rows
        .into_iter()
        .map(|client| (client.id.clone(), client))
        .collect();

    requested.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn insert(&self, client: &NewClient) -> Result<(), ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(clients::table)
            .values(NewClientRow::from(client))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "client insert"))?;

        Ok(())
    }

    async fn query_ids(&self, filter: &ClientFilter) -> Result<Vec<ClientId>, ClientRepositoryError> {
        let query = build_client_id_query(filter);
        debug!(sql = %debug_query::<Pg, _>(&query), "client id query composed");

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<String> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "client id query"))?;

        ids.into_iter()
            .map(|id| ClientId::new(id).map_err(|err| ClientRepositoryError::query(err.to_string())))
            .collect()
    }

    async fn find_by_ids(&self, ids: &[ClientId]) -> Result<Vec<Client>, ClientRepositoryError> {
        let requested = dedup_preserving_order(ids.iter().cloned());
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut found = Vec::with_capacity(requested.len());

        for chunk in requested.chunks(MAX_IDS_PER_STATEMENT) {
            let keys: Vec<&str> = chunk.iter().map(AsRef::as_ref).collect();
            let rows: Vec<ClientRow> = clients::table
                .filter(clients::id.eq_any(keys))
                .select(ClientRow::as_select())
                .load(&mut conn)
                .await
                .map_err(|err| map_diesel_error(&err, "client batch read"))?;

            for row in rows {
                found.push(decode_row(row)?);
            }
        }

        debug!(
            requested = requested.len(),
            found = found.len(),
            statements = requested.len().div_ceil(MAX_IDS_PER_STATEMENT),
            "client batch read finished"
        );
        Ok(order_by_request(&requested, found))
    }

    async fn delete(&self, id: &ClientId) -> Result<usize, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(clients::table.filter(clients::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "client delete"))
    }

    async fn delete_all(&self) -> Result<usize, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(clients::table)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "client bulk delete"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ClientName;

    fn id(value: &str) -> ClientId {
        ClientId::new(value).expect("valid id")
    }

    fn client(value: &str) -> Client {
        Client {
            id: id(value),
            name: ClientName::new(format!("name-{value}")).expect("valid name"),
            birthday: None,
            score: 0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[rstest]
    fn rows_follow_request_order() {
        let requested = vec![id("c"), id("a"), id("b")];
        let rows = vec![client("a"), client("b"), client("c")];

        let ordered = order_by_request(&requested, rows);

        let ids: Vec<&str> = ordered.iter().map(|c| c.id.as_ref()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[rstest]
    fn unknown_ids_are_omitted() {
        let requested = vec![id("a"), id("ghost"), id("b")];
        let rows = vec![client("b"), client("a")];

        let ordered = order_by_request(&requested, rows);

        let ids: Vec<&str> = ordered.iter().map(|c| c.id.as_ref()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[rstest]
    fn repeated_ids_yield_one_record() {
        let requested = dedup_preserving_order(vec![id("a"), id("b"), id("a")]);
        let rows = vec![client("a"), client("b")];

        let ordered = order_by_request(&requested, rows);

        assert_eq!(ordered.len(), 2);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(MAX_IDS_PER_STATEMENT, 1)]
    #[case(MAX_IDS_PER_STATEMENT + 1, 2)]
    #[case(2_500, 3)]
    fn batch_reads_split_into_bounded_statements(#[case] ids: usize, #[case] statements: usize) {
        let requested: Vec<ClientId> = (0..ids).map(|n| id(&format!("c-{n}"))).collect();

        let chunks = requested.chunks(MAX_IDS_PER_STATEMENT).count();

        assert_eq!(chunks, statements);
        assert!(
            requested
                .chunks(MAX_IDS_PER_STATEMENT)
                .all(|chunk| chunk.len() <= MAX_IDS_PER_STATEMENT)
        );
    }

    #[rstest]
    fn corrupt_rows_surface_as_query_errors() {
        let row = ClientRow {
            id: String::new(),
            name: "Nameless".to_owned(),
            birthday: None,
            score: None,
            created_at: None,
        };

        let err = decode_row(row).expect_err("blank id is rejected");

        assert!(matches!(err, ClientRepositoryError::Query { .. }));
    }
}
