//! Port for client persistence: inserts, filtered id queries, batch reads
//! and deletes.

use async_trait::async_trait;

use crate::domain::{Client, ClientFilter, ClientId, NewClient};

use super::define_port_error;

define_port_error! {
    /// Errors raised by client repository adapters.
    pub enum ClientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "client repository connection failed: {message}",
        /// The filter could not be turned into a statement.
        QueryBuild { message: String } =>
            "client query could not be built: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "client repository query failed: {message}",
    }
}

/// Port for reading and writing client records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client. The store assigns `created_at`.
    async fn insert(&self, client: &NewClient) -> Result<(), ClientRepositoryError>;

    /// Return the ids of clients matching `filter`, highest score first.
    ///
    /// Ties are broken by ascending id so identical queries return identical
    /// sequences.
    async fn query_ids(&self, filter: &ClientFilter) -> Result<Vec<ClientId>, ClientRepositoryError>;

    /// Load the clients with the given ids.
    ///
    /// Results follow the order of first occurrence in `ids`; unknown ids
    /// are skipped. An empty slice returns an empty list without touching
    /// the store.
    async fn find_by_ids(&self, ids: &[ClientId]) -> Result<Vec<Client>, ClientRepositoryError>;

    /// Delete one client (and, through the store, its matches).
    ///
    /// Returns the number of rows removed.
    async fn delete(&self, id: &ClientId) -> Result<usize, ClientRepositoryError>;

    /// Delete every client. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<usize, ClientRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientRepository;

#[async_trait]
impl ClientRepository for FixtureClientRepository {
    async fn insert(&self, _client: &NewClient) -> Result<(), ClientRepositoryError> {
        Ok(())
    }

    async fn query_ids(
        &self,
        _filter: &ClientFilter,
    ) -> Result<Vec<ClientId>, ClientRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_ids(&self, _ids: &[ClientId]) -> Result<Vec<Client>, ClientRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &ClientId) -> Result<usize, ClientRepositoryError> {
        Ok(0)
    }

    async fn delete_all(&self) -> Result<usize, ClientRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_query_returns_no_ids() {
        let ids = FixtureClientRepository
            .query_ids(&ClientFilter::default())
            .await
            .expect("fixture query succeeds");

        assert!(ids.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_reports_no_rows() {
        let id = ClientId::new("c-1").expect("valid id");
        let removed = FixtureClientRepository
            .delete(&id)
            .await
            .expect("fixture delete succeeds");

        assert_eq!(removed, 0);
    }

    #[rstest]
    fn query_build_error_formats_message() {
        let err = ClientRepositoryError::query_build("bad pattern");
        assert_eq!(err.to_string(), "client query could not be built: bad pattern");
    }
}
