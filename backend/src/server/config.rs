//! HTTP server configuration object and helpers.

use blog_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_fixtures: bool,
}

impl ServerConfig {
    /// Configuration using the in-memory store with fixture data.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            seed_fixtures: true,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the PostgreSQL repositories replace the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Whether the in-memory store starts with fixture users and posts.
    #[must_use]
    pub fn with_seed_fixtures(mut self, seed_fixtures: bool) -> Self {
        self.seed_fixtures = seed_fixtures;
        self
    }
}
