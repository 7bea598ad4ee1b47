//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in kinship-core.

mod error;
mod family;
mod member;
mod role_assignment;

pub use family::PgFamilyRepository;
pub use member::PgMemberRepository;
pub use role_assignment::PgRoleAssignmentRepository;
