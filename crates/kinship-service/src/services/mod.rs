//! Business logic services
//!
//! Each service is a cheap borrowed view over a shared [`ServiceContext`].

pub mod context;
pub mod error;
pub mod family;
pub mod membership;
pub mod role_board;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use family::{FamilyService, MAX_INVITE_CODE_ATTEMPTS};
pub use membership::MembershipService;
pub use role_board::{ReleaseOutcome, RoleBoard, RoleBoardService};
