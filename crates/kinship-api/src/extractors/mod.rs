//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, dates, and path ids.

mod auth;
mod date;
mod path;
mod validated;

pub use auth::AuthUser;
pub use date::{today, RoleDate};
pub use path::{ApiPath, AssignmentIdPath, InviteCodePath};
pub use validated::ValidatedJson;
