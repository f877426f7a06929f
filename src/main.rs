use anyhow::Context;
use model_catalog::api::{self, app_state::AppState};
use model_catalog::config::loader::ConfigLoader;
use model_catalog::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing, metrics_middleware,
};
use model_catalog::services::create_catalog_service;
use model_catalog::storage::{LoaderFactory, RecordStore};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("MODEL_CATALOG_CONFIG") {
        Ok(path) => ConfigLoader::load_from(path.into()),
        Err(_) => ConfigLoader::load(),
    }
    .context("failed to load configuration")?;

    let _log_guard = init_tracing(&config.app_name.replace('-', "_"), &config.logging);
    info!("Starting {} ({})...", config.app_name, config.environment);

    ConfigLoader::validate(&config).context("invalid configuration")?;
    info!("Configuration loaded successfully");

    let loader = LoaderFactory::create(&config.catalog)?;
    let store = RecordStore::load(loader.as_ref()).await?;
    info!("Record store initialized from {}", store.source());
    let catalog_source = store.source().to_string();
    let catalog_loaded_at = store.loaded_at();

    let metrics = Arc::new(AppMetrics::default());
    let catalog_service = create_catalog_service(store, metrics.clone(), config.views.clone());
    info!(
        "Catalog service initialized (default sort: {}, group: {}, mode: {})",
        config.views.default_sort, config.views.default_group, config.views.default_mode
    );

    let app_state = AppState::new(catalog_service, metrics.clone());

    let observability_state = Arc::new(
        ObservabilityState::new(env!("CARGO_PKG_VERSION").to_string(), metrics)
            .with_catalog(&catalog_source, catalog_loaded_at),
    );
    let router = create_observability_router(observability_state.clone())
        .merge(api::create_router(app_state))
        .layer(axum::middleware::from_fn_with_state(
            observability_state,
            metrics_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout.max(1),
        )));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
