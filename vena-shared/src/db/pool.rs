/// Database connection pool
///
/// Backs [`crate::store::PgRowStore`]. The pool is health-checked once on
/// creation so a bad `DATABASE_URL` fails at startup rather than on the
/// first bulk load. [`require_tables`] does the same for a schema that lacks
/// entity tables.

use crate::store::Table;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of pooled connections
    ///
    /// Default: 10. The bulk load issues one read per table at once, so
    /// fewer connections only make it queue.
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,

    /// Idle connections are closed after this many seconds (None = never)
    pub idle_timeout_secs: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: String::new(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: Some(600),
        }
    }
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` (required) and `DATABASE_MAX_CONNECTIONS`
    /// (default 10); everything else keeps its default
    pub fn from_env() -> Result<Self, sqlx::Error> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL")
            .map_err(|_| sqlx::Error::Configuration("DATABASE_URL is required".into()))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(DatabaseConfig {
            url,
            max_connections,
            ..Default::default()
        })
    }
}

/// Creates the pool and runs one health check
///
/// # Errors
///
/// Fails when the URL is invalid, the database is unreachable or the
/// health check does not pass.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Opening row store pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;
    Ok(pool)
}

/// Runs `SELECT 1` against the pool
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    if one != 1 {
        warn!(value = one, "Health check returned an unexpected value");
        return Err(sqlx::Error::Protocol("unexpected health check result".into()));
    }

    debug!("Row store pool healthy");
    Ok(())
}

/// Entity tables absent from the `public` schema
pub async fn missing_tables(pool: &PgPool) -> Result<Vec<Table>, sqlx::Error> {
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables WHERE table_schema = 'public'",
    )
    .fetch_all(pool)
    .await?;

    let missing = absent_from(&present);
    if !missing.is_empty() {
        warn!(missing = ?missing, "Schema is missing entity tables");
    }
    Ok(missing)
}

/// Fails when any entity table is missing from the schema
pub async fn require_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    schema_check(&missing_tables(pool).await?)
}

fn absent_from(present: &[String]) -> Vec<Table> {
    all_tables()
        .filter(|table| !present.iter().any(|name| name == table.name()))
        .collect()
}

fn schema_check(missing: &[Table]) -> Result<(), sqlx::Error> {
    if missing.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = missing.iter().map(|table| table.name()).collect();
    Err(sqlx::Error::Configuration(
        format!(
            "schema is missing tables: {} (set VENA_RUN_MIGRATIONS=true to create them)",
            names.join(", ")
        )
        .into(),
    ))
}

fn all_tables() -> impl Iterator<Item = Table> {
    std::iter::once(Table::Profiles).chain(Table::COLLECTIONS)
}

/// Closes every pooled connection
pub async fn close_pool(pool: PgPool) {
    info!("Closing row store pool");
    pool.close().await;
}
