//! Repository traits

mod repositories;

pub use repositories::{FamilyRepository, MemberRepository, RepoResult, RoleAssignmentRepository};
