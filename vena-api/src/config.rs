/// Configuration management for the API server
///
/// Loaded from environment variables (a `.env` file is read first when
/// present).
///
/// # Environment Variables
///
/// - `VENA_API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `VENA_API_PORT`: Port to bind to (default: 8080)
/// - `VENA_BACKEND`: Row store backend, `postgres`, `rest` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `VENA_REST_URL`, `VENA_REST_KEY`: REST service endpoint and key (required for `rest`)
/// - `VENA_RUN_MIGRATIONS`: Apply embedded migrations on startup (default: false)
/// - `VENA_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use vena_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use std::fmt;
use std::str::FromStr;
use vena_shared::db::pool::DatabaseConfig;
use vena_shared::store::RestConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Selected row store backend with its settings
    pub backend: BackendConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Apply migrations before the first load
    pub run_migrations: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            run_migrations: false,
        }
    }
}

/// Row store backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Rest,
    Memory,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "rest" => Ok(Backend::Rest),
            "memory" => Ok(Backend::Memory),
            other => anyhow::bail!("Unknown VENA_BACKEND '{}' (expected postgres, rest or memory)", other),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Postgres => "postgres",
            Backend::Rest => "rest",
            Backend::Memory => "memory",
        })
    }
}

/// Backend together with the settings it needs
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Postgres(DatabaseConfig),
    Rest(RestConfig),
    Memory,
}

impl BackendConfig {
    pub fn kind(&self) -> Backend {
        match self {
            BackendConfig::Postgres(_) => Backend::Postgres,
            BackendConfig::Rest(_) => Backend::Rest,
            BackendConfig::Memory => Backend::Memory,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has an invalid value or a variable the
    /// selected backend needs is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("VENA_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("VENA_API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;
        let run_migrations = parse_flag(&env::var("VENA_RUN_MIGRATIONS").unwrap_or_default());
        let cors_origins = parse_origins(&env::var("VENA_CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let backend = env::var("VENA_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse::<Backend>()?;

        let backend = match backend {
            Backend::Postgres => {
                let url = env::var("DATABASE_URL").map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL environment variable is required for the postgres backend")
                })?;
                let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<u32>()?;
                BackendConfig::Postgres(DatabaseConfig {
                    url,
                    max_connections,
                    ..Default::default()
                })
            }
            Backend::Rest => BackendConfig::Rest(RestConfig::from_env()?),
            Backend::Memory => BackendConfig::Memory,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                run_migrations,
            },
            backend,
        })
    }

    /// In-memory configuration with default server settings
    pub fn memory() -> Self {
        Config {
            api: ApiConfig::default(),
            backend: BackendConfig::Memory,
        }
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin is allowed
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let mut config = Config::memory();
        config.api.host = "127.0.0.1".to_string();
        config.api.port = 9000;

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("postgres".parse::<Backend>().unwrap(), Backend::Postgres);
        assert_eq!(" REST ".parse::<Backend>().unwrap(), Backend::Rest);
        assert_eq!("memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert!("sqlite".parse::<Backend>().is_err());
        assert_eq!(Backend::Rest.to_string(), "rest");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("no"));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.test, https://b.test,"),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );

        let config = Config::memory();
        assert!(config.cors_permissive());
        assert_eq!(config.backend.kind(), Backend::Memory);
    }
}
