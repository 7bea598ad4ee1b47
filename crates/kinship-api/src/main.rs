//! Kinship API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p kinship-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use kinship_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Tracing format depends on APP_ENV, so read the config first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting Kinship API Server..."
    );

    kinship_api::run(config).await?;

    Ok(())
}
