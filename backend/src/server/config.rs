//! Server settings loaded via OrthoConfig and the configuration built from
//! them.

use std::net::SocketAddr;
use std::time::Duration;

use backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// Errors raised while turning settings into a runnable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was supplied.
    #[error("CLIENTS_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// The bind address did not parse.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Process settings, read from `CLIENTS_*` environment variables, config
/// files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLIENTS")]
pub struct ServerSettings {
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept idle.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
    /// Deadline for each store call, in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

impl ServerSettings {
    /// Return the database URL or fail when it is missing or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Return the per-call store deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Build the pool configuration from these settings.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.connection_timeout_secs
                    .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
            )))
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration around an established pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }

    /// Override the per-call store deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "CLIENTS_DATABASE_URL",
        "CLIENTS_BIND_ADDR",
        "CLIENTS_POOL_MAX_SIZE",
        "CLIENTS_POOL_MIN_IDLE",
        "CLIENTS_CONNECTION_TIMEOUT_SECS",
        "CLIENTS_REQUEST_TIMEOUT_MS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("clients-backend")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| {
            !matches!(
                *name,
                "CLIENTS_DATABASE_URL" | "CLIENTS_BIND_ADDR" | "CLIENTS_POOL_MAX_SIZE"
                    | "CLIENTS_REQUEST_TIMEOUT_MS"
            )
        });
        vars.extend([
            (
                "CLIENTS_DATABASE_URL",
                Some("postgres://clients@db/clients".to_owned()),
            ),
            ("CLIENTS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("CLIENTS_POOL_MAX_SIZE", Some("25".to_owned())),
            ("CLIENTS_REQUEST_TIMEOUT_MS", Some("250".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        let pool = settings.pool_config().expect("database url present");

        assert_eq!(pool.database_url(), "postgres://clients@db/clients");
        assert_eq!(pool.max_size(), 25);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(settings.request_timeout(), Duration::from_millis(250));
    }

    #[rstest]
    fn blank_database_url_is_rejected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| *name != "CLIENTS_DATABASE_URL");
        vars.push(("CLIENTS_DATABASE_URL", Some("   ".to_owned())));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();

        assert!(matches!(
            settings.pool_config(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let mut vars = cleared();
        vars.retain(|(name, _)| *name != "CLIENTS_BIND_ADDR");
        vars.push(("CLIENTS_BIND_ADDR", Some("not-an-address".to_owned())));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
