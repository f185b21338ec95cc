//! Builders wiring the post service onto the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use blog_backend::domain::PostService;
use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::memory::{MemoryDatabase, MemoryPostRepository, MemoryUserRepository};
use blog_backend::outbound::persistence::{DieselPostRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the shared handler state.
///
/// Uses the PostgreSQL repositories when a pool is configured, otherwise a
/// fresh in-memory database, seeded when requested.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            let service = PostService::new(
                Arc::new(DieselPostRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
            );
            HttpState::from_service(Arc::new(service))
        }
        None => {
            let database = if config.seed_fixtures {
                MemoryDatabase::seeded()
            } else {
                MemoryDatabase::new()
            };
            info!(seeded = config.seed_fixtures, "using in-memory storage");
            let service = PostService::new(
                Arc::new(MemoryPostRepository::new(database.clone())),
                Arc::new(MemoryUserRepository::new(database)),
            );
            HttpState::from_service(Arc::new(service))
        }
    };
    web::Data::new(state)
}
