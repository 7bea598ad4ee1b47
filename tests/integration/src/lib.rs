//! Integration test utilities for the Kinship server
//!
//! In-memory repositories that honour the same uniqueness rules as the
//! PostgreSQL schema, plus helpers for driving the services and the REST API
//! without external infrastructure.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
pub use memory::{MemoryStore, ScriptedInviteCodes};
