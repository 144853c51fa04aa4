/// Schema migrations
///
/// The SQL lives in `vena-shared/migrations/` and is embedded at compile
/// time with `sqlx::migrate!`. It creates one table per entity with the
/// column defaults the row stores rely on (`gen_random_uuid()` ids,
/// `NOW()` timestamps, `'Langsung'` client type, ...).

use sqlx::migrate::{MigrateDatabase, MigrateError, Migrator};
use sqlx::postgres::PgPool;
use sqlx::Postgres;
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applied-migration summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Successfully applied migrations
    pub applied: usize,

    /// Highest applied version
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Number of migrations embedded in the binary
pub fn embedded_migrations() -> usize {
    MIGRATOR.iter().count()
}

/// Applies every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!(embedded = embedded_migrations(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        warn!(error = %e, "Schema migration failed");
        e
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// Reads the migration bookkeeping table
///
/// A database that was never migrated reports zero applied migrations.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let tracked: bool =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let (count, latest_version): (i64, Option<i64>) = if tracked {
        sqlx::query_as("SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?
    } else {
        debug!("No migration bookkeeping table yet");
        (0, None)
    };

    let applied = usize::try_from(count).unwrap_or(0);
    Ok(MigrationStatus {
        applied,
        latest_version,
        is_up_to_date: applied >= embedded_migrations(),
    })
}

/// Creates the database named in `database_url` when it does not exist
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        return Ok(());
    }

    info!("Creating missing database");
    Postgres::create_database(database_url).await
}
