//! Shared helper utilities for backend integration tests.
//!
//! Store-backed suites run against the database named by
//! `CLIENTS_TEST_DATABASE_URL`. When it is unset the suites print a skip
//! marker and return early so `cargo test` still passes on machines without
//! PostgreSQL.

use std::sync::{Mutex, MutexGuard};

use postgres::{Client, NoTls};

/// Environment variable naming the throwaway test database.
pub const TEST_DATABASE_URL_VAR: &str = "CLIENTS_TEST_DATABASE_URL";

const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-05-120000_create_clients/up.sql");
const DROP_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-05-120000_create_clients/down.sql");

/// Suites share one database, so they take turns.
static DATABASE_LOCK: Mutex<()> = Mutex::new(());

/// Hold the database for the duration of one test.
pub fn lock_database() -> MutexGuard<'static, ()> {
    DATABASE_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Return the test database URL, or `None` when the suite should skip.
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `postgres::Error` `Display` implementation often collapses database
/// errors to a generic `db error`, which hides the message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );

    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }

    summary
}

/// Drop and recreate the clients schema so each test starts empty.
pub fn reset_schema(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(DROP_SCHEMA_SQL)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(CREATE_SCHEMA_SQL)
        .map_err(|err| format_postgres_error(&err))
}

/// Run a statement directly, bypassing the adapters.
pub fn execute(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}

/// Count the ledger rows for `client_id`.
pub fn match_count(url: &str, client_id: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            "SELECT COUNT(*) FROM client_matches WHERE client_id = $1",
            &[&client_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Sum the ledger deltas for `client_id`.
pub fn ledger_sum(url: &str, client_id: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            "SELECT COALESCE(SUM(score), 0)::BIGINT FROM client_matches WHERE client_id = $1",
            &[&client_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
