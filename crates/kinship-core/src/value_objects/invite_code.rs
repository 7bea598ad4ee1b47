//! Invite code - the short public token that resolves to a family
//!
//! Codes are [`InviteCode::LENGTH`] characters of `A-Z0-9`. They are stored
//! upper-case and matched case-insensitively, so `ab12cd34` and `AB12CD34`
//! name the same family.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized family invite code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    pub const LENGTH: usize = 8;
    pub const CHARSET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Normalize user input (trim + upper-case) and check the format
    pub fn parse(input: &str) -> Result<Self, InviteCodeError> {
        let normalized = input.trim().to_ascii_uppercase();

        if normalized.len() != Self::LENGTH {
            return Err(InviteCodeError::WrongLength(normalized.len()));
        }
        if let Some(c) = normalized.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(InviteCodeError::InvalidCharacter(c));
        }

        Ok(Self(normalized))
    }

    /// Draw a fresh random code
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..Self::LENGTH)
            .map(|_| Self::CHARSET[rng.gen_range(0..Self::CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InviteCode {
    type Error = InviteCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> Self {
        code.0
    }
}

impl AsRef<str> for InviteCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Why a string is not an invite code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InviteCodeError {
    #[error("invite code must be {len} characters, got {0}", len = InviteCode::LENGTH)]
    WrongLength(usize),

    #[error("invite code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Source of candidate invite codes
///
/// The family directory draws from this when creating a family and draws
/// again on collision. Swappable so collision handling can be exercised.
pub trait InviteCodeSource: Send + Sync {
    fn next_code(&self) -> InviteCode;
}

/// Uniformly random codes from [`InviteCode::CHARSET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInviteCodes;

impl InviteCodeSource for RandomInviteCodes {
    fn next_code(&self) -> InviteCode {
        InviteCode::random()
    }
}
