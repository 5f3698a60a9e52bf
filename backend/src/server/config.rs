//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use titto_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps community state in memory.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
