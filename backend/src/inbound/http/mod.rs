//! HTTP inbound adapter exposing the clients REST endpoints.

pub mod clients;
pub mod error;
pub mod health;
pub mod schemas;
pub mod sort;
pub mod state;
pub mod validation;

pub use error::{ApiResult, json_config};
