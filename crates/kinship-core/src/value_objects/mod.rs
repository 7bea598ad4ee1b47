//! Value objects - immutable types that represent domain concepts

mod invite_code;
mod role_kind;
mod snowflake;

pub use invite_code::{InviteCode, InviteCodeError, InviteCodeSource, RandomInviteCodes};
pub use role_kind::{RoleKind, UnknownRole};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
