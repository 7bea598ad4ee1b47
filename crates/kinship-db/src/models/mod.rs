//! Database models - SQLx-compatible structs for PostgreSQL tables

mod family;
mod member;
mod role_assignment;

pub use family::FamilyModel;
pub use member::MemberModel;
pub use role_assignment::RoleAssignmentModel;
