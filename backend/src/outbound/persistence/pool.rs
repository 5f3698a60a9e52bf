//! Shared `bb8` pool of async Diesel PostgreSQL connections.
//!
//! Every Diesel repository clones one [`DbPool`]; checkouts wait at most the
//! configured timeout so a saturated database surfaces as a connection error
//! instead of a hung request.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be created.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Diagnostic text without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Connection pool settings.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use titto_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://titto@localhost/titto")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: ten connections, two kept idle, thirty second checkout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of pooled connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self.min_idle = self.min_idle.map(|idle| idle.min(self.max_size));
        self
    }

    /// Set the number of idle connections kept warm.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set how long a checkout may wait.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of pooled connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the async connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is invalid or the initial
    /// connections cannot be established.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when the timeout elapses.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_documented_values() {
        let config = PoolConfig::new("postgres://localhost/titto");

        assert_eq!(config.database_url(), "postgres://localhost/titto");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case(0, 1, Some(1))]
    #[case(1, 1, Some(1))]
    #[case(20, 20, Some(2))]
    fn max_size_is_at_least_one_and_bounds_idle(
        #[case] requested: u32,
        #[case] expected_max: u32,
        #[case] expected_idle: Option<u32>,
    ) {
        let config = PoolConfig::new("postgres://localhost/titto").with_max_size(requested);

        assert_eq!(config.max_size(), expected_max);
        assert_eq!(config.min_idle, expected_idle);
    }

    #[rstest]
    fn error_message_survives_unwrapping() {
        let error = PoolError::checkout("connection refused");

        assert!(error.to_string().contains("connection refused"));
        assert_eq!(error.into_message(), "connection refused");
    }
}
