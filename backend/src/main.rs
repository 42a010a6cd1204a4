//! Backend entry-point: loads settings, prepares storage, and serves HTTP.

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use volunteer_backend::inbound::http::health::HealthState;
use volunteer_backend::inbound::http::identity_config::{
    BuildMode, IdentitySettings, identity_settings_from_env,
};
use volunteer_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use volunteer_backend::server::{AppSettings, ServerConfig, create_server};

/// Apply migrations off the async runtime and open the pool.
async fn prepare_database(url: &str, settings: &AppSettings) -> std::io::Result<DbPool> {
    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(std::io::Error::other)?;
    pool.ping().await.map_err(std::io::Error::other)?;
    Ok(pool)
}

/// Identity settings read from the process environment.
fn identity_settings(mode: BuildMode) -> std::io::Result<IdentitySettings> {
    identity_settings_from_env(&DefaultEnv::new(), mode).map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let identity = identity_settings(BuildMode::from_debug_assertions())?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, identity);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(prepare_database(url, &settings).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "volunteer backend listening");
    server.await
}
