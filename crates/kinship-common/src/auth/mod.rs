//! Access-token verification
//!
//! Users sign in with the hosted auth service; this crate only verifies the
//! tokens it issues.

mod jwt;

pub use jwt::{Claims, JwtService};
