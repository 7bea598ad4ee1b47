//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod families;
pub mod health;
pub mod invites;
pub mod members;
pub mod roles;
