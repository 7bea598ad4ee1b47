//! Domain entities

mod family;
mod member;
mod role_assignment;

pub use family::Family;
pub use member::Member;
pub use role_assignment::{AssignmentStatus, RoleAssignment};
