//! # Vena API Server
//!
//! Serves the Vena data layer over HTTP. On startup it picks the row store
//! backend from `VENA_BACKEND`, optionally applies migrations, runs the
//! bulk load and then serves requests.
//!
//! ## Usage
//!
//! ```bash
//! VENA_BACKEND=memory cargo run -p vena-api
//! ```

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vena_api::app::{build_router, AppState};
use vena_api::config::{BackendConfig, Config};
use vena_shared::data::DataStore;
use vena_shared::db::{migrations, pool};
use vena_shared::store::{MemoryRowStore, PgRowStore, RestRowStore, RowStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vena_api=debug,vena_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Vena API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let store = connect_store(&config).await?;
    let data = DataStore::new(store);

    // A failed first load is reported by /health; POST /v1/refetch retries it
    if let Err(e) = data.load_all().await {
        tracing::error!(error = %e, "Initial load failed");
    }

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(data, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn RowStore>> {
    tracing::info!(backend = %config.backend.kind(), "Connecting row store");

    let store: Arc<dyn RowStore> = match &config.backend {
        BackendConfig::Postgres(db) => {
            if config.api.run_migrations {
                migrations::ensure_database_exists(&db.url).await?;
            }
            let pool = pool::create_pool(db.clone()).await?;
            if config.api.run_migrations {
                migrations::run_migrations(&pool).await?;
            }
            pool::require_tables(&pool).await?;
            Arc::new(PgRowStore::new(pool))
        }
        BackendConfig::Rest(rest) => Arc::new(RestRowStore::new(rest.clone())?),
        BackendConfig::Memory => {
            tracing::warn!("Using the in-memory row store; data is lost on exit");
            Arc::new(MemoryRowStore::new())
        }
    };

    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
