//! Server settings loaded via OrthoConfig.
//!
//! Values come from `TITTO_*` environment variables, a configuration file, or
//! command-line flags such as `--bind-addr`.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime configuration for the HTTP server and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TITTO")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the server keeps its state in
    /// memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

/// Raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address '{value}': {source}")]
pub struct InvalidBindAddr {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

impl ServerSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidBindAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return the database URL when one is configured and not blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "TITTO_BIND_ADDR",
        "TITTO_DATABASE_URL",
        "TITTO_DB_MAX_CONNECTIONS",
        "TITTO_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("titto-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TITTO_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "TITTO_DATABASE_URL",
                Some("postgres://titto@localhost/titto".to_owned()),
            ),
            ("TITTO_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("TITTO_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9090
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://titto@localhost/titto")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(settings.skip_migrations);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: Some("   ".to_owned()),
            db_max_connections: None,
            skip_migrations: false,
        };

        assert_eq!(settings.database_url(), None);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            db_max_connections: None,
            skip_migrations: false,
        };

        let err = settings.bind_addr().expect_err("hostnames are not socket addresses");
        assert!(err.to_string().contains("localhost"));
    }
}
