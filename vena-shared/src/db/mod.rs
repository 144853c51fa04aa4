/// PostgreSQL plumbing for the row store
///
/// # Modules
///
/// - `pool`: connection pool with a health check
/// - `migrations`: schema migrations embedded from `migrations/`
///
/// # Example
///
/// ```no_run
/// use vena_shared::db::migrations::run_migrations;
/// use vena_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::from_env()?).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
