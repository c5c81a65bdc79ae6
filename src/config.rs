// Application configuration loaded from the environment

use crate::auth::password::HashCost;

/// Default SQLite database used when DATABASE_URL is not set
const DEFAULT_DATABASE_URL: &str = "sqlite://users.db";

/// Configuration errors raised at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Explicit configuration passed to the application at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub hash_cost: HashCost,
}

impl Config {
    /// Build the configuration from process environment variables
    ///
    /// `JWT_SECRET` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080)?;

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or("ARGON2_MEMORY_KIB", lookup("ARGON2_MEMORY_KIB"), defaults.memory_kib)?,
            iterations: parse_or("ARGON2_ITERATIONS", lookup("ARGON2_ITERATIONS"), defaults.iterations)?,
            parallelism: parse_or("ARGON2_PARALLELISM", lookup("ARGON2_PARALLELISM"), defaults.parallelism)?,
        };
        hash_cost.params().map_err(|e| ConfigError::Invalid {
            name: "ARGON2_MEMORY_KIB/ARGON2_ITERATIONS/ARGON2_PARALLELISM",
            value: format!("{:?} ({})", hash_cost, e),
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            hash_cost,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
