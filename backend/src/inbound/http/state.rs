//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ClientsCommand, ClientsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub clients: Arc<dyn ClientsCommand>,
    pub clients_query: Arc<dyn ClientsQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureClientsCommand, FixtureClientsQuery};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureClientsCommand), Arc::new(FixtureClientsQuery));
    /// let _clients = state.clients.clone();
    /// ```
    pub fn new(clients: Arc<dyn ClientsCommand>, clients_query: Arc<dyn ClientsQuery>) -> Self {
        Self {
            clients,
            clients_query,
        }
    }
}
