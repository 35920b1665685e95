//! Builders wiring the Diesel adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{ClientsCommandService, ClientsQueryService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DieselClientRepository, DieselMatchLedger};

use super::ServerConfig;

/// Build the HTTP state backed by the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(DieselClientRepository::new(config.db_pool.clone()));
    let ledger = Arc::new(DieselMatchLedger::new(config.db_pool.clone()));

    let command = ClientsCommandService::new(repository.clone(), ledger)
        .with_request_timeout(config.request_timeout);
    let query = ClientsQueryService::new(repository).with_request_timeout(config.request_timeout);

    web::Data::new(HttpState::new(Arc::new(command), Arc::new(query)))
}
