//! # kinship-common
//!
//! Shared utilities including configuration, error handling, access-token
//! verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, SnowflakeConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
