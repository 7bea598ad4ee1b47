//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: rows carry codes and role names as text, so
//!   converting back can fail if the table was edited by hand
//! - `*Insert` structs: entity data flattened into bind values

mod family;
mod member;
mod role_assignment;

pub use family::FamilyInsert;
pub use role_assignment::RoleAssignmentInsert;
