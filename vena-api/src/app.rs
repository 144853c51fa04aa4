/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vena_api::{app::{build_router, AppState}, config::Config};
/// use vena_shared::data::DataStore;
/// use vena_shared::store::MemoryRowStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let data = DataStore::new(Arc::new(MemoryRowStore::new()));
/// data.load_all().await?;
///
/// let app = build_router(AppState::new(data, Config::memory()));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use vena_shared::data::DataStore;
use vena_shared::notify::{LogMailer, Notifier};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; every
/// field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Data access façade holding every collection
    pub data: DataStore,

    /// Notification fan-out
    pub notifier: Notifier,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state that mails notifications to the log
    pub fn new(data: DataStore, config: Config) -> Self {
        Self::with_notifier(data, Notifier::new(Arc::new(LogMailer)), config)
    }

    pub fn with_notifier(data: DataStore, notifier: Notifier, config: Config) -> Self {
        Self {
            data,
            notifier,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Health check
/// └── /v1/
///     ├── GET  /status             # Load state and counts
///     ├── POST /refetch            # Bulk reload
///     ├── GET|PATCH /profile       # Vendor profile
///     ├── /inbox                   # Notification publish / read receipts
///     └── /:collection[/:id]       # CRUD on every entity collection
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let inbox_routes = Router::new()
        .route("/", post(routes::inbox::publish))
        .route("/read-all", post(routes::inbox::mark_all_read))
        .route("/:id/read", post(routes::inbox::mark_read));

    let v1_routes = Router::new()
        .route("/status", get(routes::status::status))
        .route("/refetch", post(routes::status::refetch))
        .route(
            "/profile",
            get(routes::profile::get_profile).patch(routes::profile::update_profile),
        )
        .nest("/inbox", inbox_routes)
        .route(
            "/:collection",
            get(routes::collections::list_records).post(routes::collections::create_record),
        )
        .route(
            "/:collection/:id",
            get(routes::collections::get_record)
                .patch(routes::collections::update_record)
                .delete(routes::collections::delete_record),
        );

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
