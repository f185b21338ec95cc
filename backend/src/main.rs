//! Backend entry-point: loads settings, wires storage and serves the REST API.

mod server;

use actix_web::web;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::inbound::http::health::HealthState;
use blog_backend::outbound::persistence::DbPool;
use blog_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config =
        ServerConfig::new(settings.bind_addr()).with_seed_fixtures(settings.seed_fixtures());
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        pool.check_connection()
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let (host, port) = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%host, port, "server listening");
    server.await
}
