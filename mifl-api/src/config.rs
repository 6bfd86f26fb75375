/// Configuration management for the web server
///
/// Loads configuration from environment variables (and a `.env` file when
/// present) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_PRODUCTION`: Enables HSTS and `Secure` cookies (default: false)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `SESSION_COOKIE_NAME`: Session cookie name (default: mifl_session)
/// - `SESSION_TTL_HOURS`: Lifetime of an ordinary login (default: 24)
/// - `SESSION_REMEMBER_DAYS`: Lifetime of a "remember me" login (default: 365)
///
/// Both session lifetimes must be positive and at most ten years.
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use mifl_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Listening on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use mifl_shared::auth::session::SessionPolicy;
use serde::{Deserialize, Serialize};
use std::env;

/// Upper bound on either session lifetime
const MAX_SESSION_DAYS: i64 = 3650;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Storage backend configuration
    pub store: StoreConfig,

    /// Login session configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode: served over HTTPS
    pub production: bool,
}

/// Which store backs the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// PostgreSQL connection URL (empty for the memory backend)
    pub database_url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Login session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,

    /// Lifetime of an ordinary login, in hours
    pub ttl_hours: i64,

    /// Lifetime of a "remember me" login, in days
    pub remember_days: i64,
}

impl SessionConfig {
    /// Session lifetimes as used by the authenticator
    pub fn policy(&self) -> SessionPolicy {
        SessionPolicy {
            ttl: chrono::Duration::hours(self.ttl_hours),
            remember_for: chrono::Duration::days(self.remember_days),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - A numeric or boolean variable does not parse
    /// - `STORE_BACKEND` names an unknown backend
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_host = var("API_HOST", "0.0.0.0");
        let api_port = var("API_PORT", "8080").parse::<u16>()?;
        let production = var("API_PRODUCTION", "false").parse::<bool>()?;

        let backend = match var("STORE_BACKEND", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown STORE_BACKEND: {}", other),
        };

        let database_url = match backend {
            StoreBackend::Postgres => lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            StoreBackend::Memory => lookup("DATABASE_URL").unwrap_or_default(),
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;

        let cookie_name = var("SESSION_COOKIE_NAME", "mifl_session");
        let ttl_hours = var("SESSION_TTL_HOURS", "24").parse::<i64>()?;
        let remember_days = var("SESSION_REMEMBER_DAYS", "365").parse::<i64>()?;

        if ttl_hours <= 0 || remember_days <= 0 {
            anyhow::bail!("Session lifetimes must be positive");
        }
        if ttl_hours > MAX_SESSION_DAYS * 24 || remember_days > MAX_SESSION_DAYS {
            anyhow::bail!("Session lifetimes cannot exceed {} days", MAX_SESSION_DAYS);
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                production,
            },
            store: StoreConfig {
                backend,
                database_url,
                max_connections,
            },
            session: SessionConfig {
                cookie_name,
                ttl_hours,
                remember_days,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Configuration for tests and local runs: memory store, default sessions
    pub fn in_memory() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                production: false,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: String::new(),
                max_connections: 1,
            },
            session: SessionConfig {
                cookie_name: "mifl_session".to_string(),
                ttl_hours: 24,
                remember_days: 365,
            },
        }
    }
}
