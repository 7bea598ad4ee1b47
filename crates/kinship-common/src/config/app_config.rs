//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file, if any).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidValue("APP_ENV", s.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// When set, migrations in this directory are applied at startup
    #[serde(default)]
    pub migrations_dir: Option<PathBuf>,
}

/// Access-token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Shared HS256 secret of the auth service
    pub secret: String,
    /// Expected `aud` claim; `None` skips the audience check
    #[serde(default = "default_audience")]
    pub audience: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "kinship".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

#[allow(clippy::unnecessary_wraps)]
fn default_audience() -> Option<String> {
    Some("authenticated".to_string())
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars.parse("APP_ENV")?.unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.require_parsed("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.require("DATABASE_URL")?,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                migrations_dir: vars
                    .get("DATABASE_MIGRATIONS_DIR")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from),
            },
            jwt: JwtConfig {
                secret: vars.require("JWT_SECRET")?,
                // An explicitly empty JWT_AUDIENCE disables the check
                audience: match vars.get("JWT_AUDIENCE") {
                    Some(aud) if aud.trim().is_empty() => None,
                    Some(aud) => Some(aud),
                    None => default_audience(),
                },
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: vars.parse("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: match vars.parse::<u16>("WORKER_ID")? {
                    Some(id) if id >= 1024 => {
                        return Err(ConfigError::InvalidValue("WORKER_ID", id.to_string()))
                    }
                    Some(id) => id,
                    None => 0,
                },
            },
        })
    }
}

/// Typed access to a variable source
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
            })
            .transpose()
    }

    fn require_parsed<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        self.parse(key)?.ok_or(ConfigError::MissingVar(key))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
