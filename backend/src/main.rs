//! User service entry-point: loads settings, prepares persistence and serves
//! the users API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let request_timeout = settings.request_timeout()?;
    let mut config = ServerConfig::new(bind_addr, settings.company_service_url()?, request_timeout)
        .with_lookup_failure_policy(settings.lookup_failure_policy()?);

    if let Some(pool_config) = settings.pool_config()? {
        config = config.with_db_pool(prepare_database(pool_config).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "user service listening");
    server.await?;
    Ok(())
}

/// Apply pending migrations, then open the connection pool.
async fn prepare_database(pool_config: PoolConfig) -> color_eyre::Result<DbPool> {
    let url = pool_config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| eyre!("migration task failed: {err}"))??;
    info!(
        applied,
        max_connections = pool_config.max_size(),
        "database migrations up to date"
    );

    DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")
}
