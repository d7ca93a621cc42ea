mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use palate_core::{AppConfig, Environment, RestaurantStore, StoreBackend};
use palate_resolver::ResolutionService;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = palate_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(store = %config.store_backend, env = %config.env, "starting palate-server");

    match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let pool_config = palate_db::PoolConfig::from_app_config(&config);
            let pool = palate_db::connect_pool(database_url, pool_config).await?;
            let applied = palate_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations up to date");
            serve(palate_db::PgRestaurantStore::new(pool), &config).await
        }
        StoreBackend::Hasura => {
            let client = palate_hasura::HasuraClient::from_app_config(&config)?;
            serve(palate_hasura::HasuraRestaurantStore::new(client), &config).await
        }
    }
}

async fn serve<S>(store: S, config: &AppConfig) -> anyhow::Result<()>
where
    S: RestaurantStore + 'static,
{
    let resolver = ResolutionService::new(Arc::new(store))
        .with_timeout(Duration::from_secs(config.resolve_timeout_secs));
    let auth = AuthState::from_env(matches!(config.env, Environment::Development))?;
    let app = build_app(AppState { resolver }, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
