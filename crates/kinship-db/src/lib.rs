//! # kinship-db
//!
//! Database layer implementing the kinship-core repository traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The exclusivity rules of the role board live in the schema as partial
//! unique indexes (see `migrations/`); the repositories translate their
//! violations into domain errors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kinship_db::{create_pool, PgFamilyRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/kinship")).await?;
//!     let families = PgFamilyRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgFamilyRepository, PgMemberRepository, PgRoleAssignmentRepository};
