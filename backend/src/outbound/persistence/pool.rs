//! Bounded async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async`'s `bb8` integration. Repositories check out one
//! connection per operation; the checkout guard returns it to the pool when
//! dropped, on success and error paths alike.

use std::time::Duration;

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::info;

/// Errors raised while building the pool or checking out connections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available within the checkout timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// A freshly checked-out connection failed its liveness query.
    #[error("database connection check failed: {message}")]
    Check { message: String },
}

impl PoolError {
    /// Connection checkout failed.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Pool construction failed.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Liveness query failed.
    pub fn check(message: impl Into<String>) -> Self {
        Self::Check {
            message: message.into(),
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Checkout { message } | Self::Build { message } | Self::Check { message } => {
                message
            }
        }
    }
}

/// Pool sizing and timeout configuration.
///
/// Defaults: at most 10 connections, 2 kept idle, 30 second checkout timeout.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use blog_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/blog")
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
    /// Configuration with default sizing for `database_url`.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Cap the number of pooled connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Idle connections kept open; `None` lets the pool decide.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a checkout may wait.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum pool size.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Minimum idle connections.
    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    /// Checkout timeout.
    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Shared PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from `config`.
    ///
    /// # Errors
    /// Returns [`PoolError::Build`] when the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        info!(
            max_size = config.max_size,
            min_idle = ?config.min_idle,
            "database pool created"
        );
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// Returns [`PoolError::Checkout`] when none is available within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Verify the database answers a trivial query.
    ///
    /// # Errors
    /// Returns [`PoolError::Checkout`] or [`PoolError::Check`] when the
    /// database is unreachable.
    pub async fn check_connection(&self) -> Result<(), PoolError> {
        let mut conn = self.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| PoolError::check(err.to_string()))
    }
}
