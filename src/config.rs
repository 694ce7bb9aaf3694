//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,

    /// Directory holding users.json, sessions.json and transactions.json
    pub data_dir: PathBuf,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Bearer token lifetime
    pub token_ttl: Duration,

    /// How often expired revocation entries are swept
    pub revocation_sweep_interval: Duration,

    /// Seed demo accounts into an empty users file
    pub seed_demo_accounts: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var("JWT_SECRET_KEY").map_err(|_| ConfigError::MissingEnv("JWT_SECRET_KEY"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET_KEY"));
        }

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let token_ttl = parse_seconds("TOKEN_TTL_SECONDS", 300)?;
        let revocation_sweep_interval = parse_seconds("REVOCATION_SWEEP_INTERVAL_SECONDS", 60)?;

        let seed_demo_accounts = env::var("SEED_DEMO_ACCOUNTS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("SEED_DEMO_ACCOUNTS"))?;

        Ok(Self {
            jwt_secret,
            data_dir,
            host,
            port,
            environment,
            token_ttl,
            revocation_sweep_interval,
            seed_demo_accounts,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("token_ttl", &self.token_ttl)
            .field("revocation_sweep_interval", &self.revocation_sweep_interval)
            .field("seed_demo_accounts", &self.seed_demo_accounts)
            .finish()
    }
}

fn parse_seconds(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let secs: u64 = match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue(name))?,
        Err(_) => default,
    };
    if secs == 0 {
        return Err(ConfigError::InvalidValue(name));
    }
    Ok(Duration::from_secs(secs))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
