//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete client repository and match ledger
//! backed by PostgreSQL via Diesel, with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Validation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table
//!   definitions (`schema.rs`) never leave this module.
//! - **Bound values only**: filters are composed with Diesel's query
//!   builder, so every value is sent as a bind parameter.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   port error enums.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselClientRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/clients")).await?;
//! let repo = DieselClientRepository::new(pool);
//! ```

mod client_query_builder;
mod diesel_client_repository;
pub(crate) mod diesel_helpers;
mod diesel_match_ledger;
mod models;
mod pool;
mod schema;

pub use diesel_client_repository::{DieselClientRepository, MAX_IDS_PER_STATEMENT};
pub use diesel_match_ledger::DieselMatchLedger;
pub use models::{NULL_SCORE_DEFAULT, null_created_at_default};
pub use pool::{DbPool, PoolConfig, PoolError};
