//! # kinship-api
//!
//! REST API server built with Axum framework. Exposes the family directory,
//! membership, and daily role board services over JSON.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server, serve};
pub use state::AppState;
