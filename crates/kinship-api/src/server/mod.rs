//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use kinship_common::{AppConfig, AppError, JwtService};
use kinship_core::SnowflakeGenerator;
use kinship_db::{
    create_pool, run_migrations, PgFamilyRepository, PgMemberRepository,
    PgRoleAssignmentRepository, PoolConfig,
};
use kinship_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes skip rate limiting and CORS.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    Router::new().merge(health).merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig::new(config.database.url.clone()).with_connections(
        config.database.min_connections,
        config.database.max_connections,
    );
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if let Some(dir) = &config.database.migrations_dir {
        run_migrations(&pool, dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let family_repo = Arc::new(PgFamilyRepository::new(pool.clone()));
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let role_assignment_repo = Arc::new(PgRoleAssignmentRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .family_repo(family_repo)
        .member_repo(member_repo)
        .role_assignment_repo(role_assignment_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .context("Failed to build service context")
        .map_err(AppError::Internal)?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .context("Server error")
        .map_err(AppError::Internal)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))
        .map_err(AppError::Internal)?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.api.address()))
        .map_err(AppError::Internal)?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
