//! # kinship-core
//!
//! Domain layer containing entities, value objects and repository traits for
//! family membership and the daily role board.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AssignmentStatus, Family, Member, RoleAssignment};
pub use error::DomainError;
pub use traits::{FamilyRepository, MemberRepository, RepoResult, RoleAssignmentRepository};
pub use value_objects::{
    InviteCode, InviteCodeError, InviteCodeSource, RandomInviteCodes, RoleKind, Snowflake,
    SnowflakeGenerator, SnowflakeParseError, UnknownRole,
};
