//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOG_*` environment variables and config
//! files, in OrthoConfig's usual precedence order.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEED_FIXTURES: bool = true;

/// Server and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<String>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections the pool keeps warm.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Seed users and posts into the in-memory store. Defaults to `true`.
    pub seed_fixtures: Option<bool>,
}

impl AppSettings {
    /// Host and port for the HTTP listener.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Whether the in-memory store starts with fixture data.
    pub fn seed_fixtures(&self) -> bool {
        self.seed_fixtures.unwrap_or(DEFAULT_SEED_FIXTURES)
    }

    /// Pool configuration, present only when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                )),
        )
    }
}
