use axum_helpers::server::{create_production_app, health_router};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use fleet_api::{api, config::Config, openapi::ApiDoc, state::AppState};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Retries only cover startup, while the database may still be booting
    let retry = RetryConfig::from_env()?;
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), Some(retry))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let state = AppState::new(config, db);

    let router = axum_helpers::create_router::<ApiDoc>(api::routes(&state)).await?;

    // - /health: liveness with app name/version
    // - /ready: readiness with a database ping
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting fleet API with graceful shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    let db = state.db.clone();

    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Fleet API shutdown complete");
    Ok(())
}
