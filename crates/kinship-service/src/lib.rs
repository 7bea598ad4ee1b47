//! # kinship-service
//!
//! Application layer: the family directory, the membership manager and the
//! daily role board, plus the DTOs the HTTP layer serializes.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
